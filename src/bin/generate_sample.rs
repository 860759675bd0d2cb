//! Writes a synthetic shot-event file in the layout of
//! `euros_2024_shot_map.csv` (plus a Parquet copy with list locations).

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Float64Builder, Int64Array, ListBuilder, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use clap::Parser;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

#[derive(Parser)]
#[command(name = "generate_sample")]
#[command(about = "Write a synthetic shot-event dataset", long_about = None)]
struct Cli {
    /// Output CSV path
    #[arg(long, default_value = "euros_2024_shot_map.csv")]
    csv: PathBuf,

    /// Also write a Parquet copy to this path
    #[arg(long)]
    parquet: Option<PathBuf>,

    /// PRNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

const SQUADS: [(&str, [&str; 4]); 6] = [
    ("Spain", ["Álvaro Morata", "Lamine Yamal", "Dani Olmo", "Fabián Ruiz"]),
    ("England", ["Harry Kane", "Bukayo Saka", "Jude Bellingham", "Phil Foden"]),
    ("Germany", ["Kai Havertz", "Jamal Musiala", "Florian Wirtz", "Niclas Füllkrug"]),
    ("France", ["Kylian Mbappé", "Antoine Griezmann", "Ousmane Dembélé", "Randal Kolo Muani"]),
    ("Netherlands", ["Cody Gakpo", "Memphis Depay", "Xavi Simons", "Donyell Malen"]),
    ("Portugal", ["Cristiano Ronaldo", "Bruno Fernandes", "Bernardo Silva", "Rafael Leão"]),
];

const MISSES: [&str; 5] = ["Saved", "Blocked", "Off T", "Wayward", "Post"];
const BODY_PARTS: [&str; 3] = ["Right Foot", "Left Foot", "Head"];
const TECHNIQUES: [&str; 3] = ["Normal", "Volley", "Half Volley"];

/// One output row. Non-shot events leave the shot columns empty.
#[derive(Debug, Serialize)]
struct EventRow {
    id: i64,
    #[serde(rename = "type")]
    event_type: &'static str,
    team: &'static str,
    player: &'static str,
    minute: i64,
    location: String,
    shot_outcome: Option<&'static str>,
    shot_statsbomb_xg: Option<f64>,
    shot_type: Option<&'static str>,
    shot_technique: Option<&'static str>,
    shot_body_part: Option<&'static str>,
    #[serde(skip)]
    xy: [f64; 2],
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn pick<T: Copy>(&mut self, items: &[T]) -> T {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// Rough xG from distance to the goal centre (120, 40).
fn xg_for(x: f64, y: f64) -> f64 {
    let distance = ((120.0 - x).powi(2) + (40.0 - y).powi(2)).sqrt();
    (0.9 * (-distance / 6.5).exp()).clamp(0.01, 0.95)
}

fn generate(rng: &mut SimpleRng) -> Vec<EventRow> {
    let mut rows = Vec::new();
    let mut id = 0;

    for (team, players) in SQUADS {
        for player in players {
            let n_shots = 2 + (rng.next_u64() % 9) as usize;
            for _ in 0..n_shots {
                // A pass before every shot so the loader has rows to drop.
                id += 1;
                let minute = (rng.next_u64() % 95) as i64;
                let px = rng.gauss(70.0, 12.0).clamp(0.0, 120.0);
                let py = rng.gauss(40.0, 18.0).clamp(0.0, 80.0);
                rows.push(EventRow {
                    id,
                    event_type: "Pass",
                    team,
                    player,
                    minute,
                    location: format!("[{px:.1}, {py:.1}]"),
                    shot_outcome: None,
                    shot_statsbomb_xg: None,
                    shot_type: None,
                    shot_technique: None,
                    shot_body_part: None,
                    xy: [px, py],
                });

                id += 1;
                rows.push(shot(rng, id, team, player, minute));
            }
        }
    }
    rows
}

fn shot(
    rng: &mut SimpleRng,
    id: i64,
    team: &'static str,
    player: &'static str,
    minute: i64,
) -> EventRow {
    let penalty = rng.next_f64() < 0.04;
    let (x, y, xg, shot_type) = if penalty {
        (108.0, 40.0, 0.7835, "Penalty")
    } else {
        let x = (120.0 - rng.gauss(0.0, 11.0).abs()).clamp(85.0, 119.5);
        let y = rng.gauss(40.0, 9.0).clamp(5.0, 75.0);
        let free_kick = x < 100.0 && rng.next_f64() < 0.1;
        (x, y, xg_for(x, y), if free_kick { "Free Kick" } else { "Open Play" })
    };

    let goal = rng.next_f64() < xg;
    let location = match id % 7 {
        // Every form the source data has been seen in.
        0 => format!("['{x:.1}', '{y:.1}']"),
        3 => format!("[{x:.1}, {y:.1}, 0.4]"),
        _ if id % 151 == 0 => "None".to_string(),
        _ => format!("[{x:.1}, {y:.1}]"),
    };

    EventRow {
        id,
        event_type: "Shot",
        team,
        player,
        minute,
        location,
        shot_outcome: Some(if goal { "Goal" } else { rng.pick(&MISSES) }),
        shot_statsbomb_xg: Some((xg * 10_000.0).round() / 10_000.0),
        shot_type: Some(shot_type),
        shot_technique: Some(if penalty { "Normal" } else { rng.pick(&TECHNIQUES) }),
        shot_body_part: Some(rng.pick(&BODY_PARTS)),
        xy: [x, y],
    }
}

fn write_csv(rows: &[EventRow], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(rows: &[EventRow], path: &Path) -> Result<()> {
    let mut location_builder = ListBuilder::new(Float64Builder::new());
    for row in rows {
        let values = location_builder.values();
        for &v in &row.xy {
            values.append_value(v);
        }
        location_builder.append(true);
    }

    let strings = |f: fn(&EventRow) -> Option<&str>| -> StringArray {
        rows.iter().map(f).collect()
    };

    let schema = Arc::new(Schema::new(vec![
        Field::new("id", DataType::Int64, false),
        Field::new("type", DataType::Utf8, false),
        Field::new("team", DataType::Utf8, false),
        Field::new("player", DataType::Utf8, false),
        Field::new("minute", DataType::Int64, false),
        Field::new(
            "location",
            DataType::List(Arc::new(Field::new("item", DataType::Float64, true))),
            false,
        ),
        Field::new("shot_outcome", DataType::Utf8, true),
        Field::new("shot_statsbomb_xg", DataType::Float64, true),
        Field::new("shot_type", DataType::Utf8, true),
        Field::new("shot_technique", DataType::Utf8, true),
        Field::new("shot_body_part", DataType::Utf8, true),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from(rows.iter().map(|r| r.id).collect::<Vec<_>>())),
            Arc::new(strings(|r| Some(r.event_type))),
            Arc::new(strings(|r| Some(r.team))),
            Arc::new(strings(|r| Some(r.player))),
            Arc::new(Int64Array::from(rows.iter().map(|r| r.minute).collect::<Vec<_>>())),
            Arc::new(location_builder.finish()),
            Arc::new(strings(|r| r.shot_outcome)),
            Arc::new(Float64Array::from(
                rows.iter().map(|r| r.shot_statsbomb_xg).collect::<Vec<_>>(),
            )),
            Arc::new(strings(|r| r.shot_type)),
            Arc::new(strings(|r| r.shot_technique)),
            Arc::new(strings(|r| r.shot_body_part)),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating Parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating Parquet writer")?;
    writer.write(&batch).context("writing Parquet batch")?;
    writer.close().context("closing Parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let mut rng = SimpleRng::new(cli.seed);

    let rows = generate(&mut rng);
    let shots = rows.iter().filter(|r| r.event_type == "Shot").count();

    write_csv(&rows, &cli.csv)?;
    println!("Wrote {} events ({shots} shots) to {}", rows.len(), cli.csv.display());

    if let Some(path) = &cli.parquet {
        write_parquet(&rows, path)?;
        println!("Wrote Parquet copy to {}", path.display());
    }
    Ok(())
}

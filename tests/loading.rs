use std::fs;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Float64Array, Float64Builder, ListBuilder, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use shot_map::data::filter::ShotFilter;
use shot_map::data::loader::{DEFAULT_XG, load_file};
use shot_map::data::model::Coordinate;
use shot_map::view::run;
use tempfile::TempDir;

const HEADER: &str = "type,team,player,minute,location,shot_outcome,shot_statsbomb_xg,shot_type,shot_technique,shot_body_part";

fn write_csv(path: &Path, rows: &[&str]) {
    let mut out = String::from(HEADER);
    out.push('\n');
    for row in rows {
        out.push_str(row);
        out.push('\n');
    }
    fs::write(path, out).unwrap();
}

fn sample_rows() -> Vec<&'static str> {
    vec![
        r#"Shot,Spain,Morata,12,"[108.0, 40.0]",Goal,0.4,Open Play,Normal,Head"#,
        r#"Pass,Spain,Rodri,13,"[60.0, 40.0]",,,,,"#,
        r#"Shot,Spain,Morata,30,"['100.0', '30.0']",Saved,0.1,Open Play,Normal,Right Foot"#,
        r#"Shot,Spain,Morata,55,"[112.0, 44.0]",Goal,0.5,Open Play,Volley,Left Foot"#,
        r#"Shot,Spain,Yamal,70,broken,Wayward,0.03,Open Play,Normal,Left Foot"#,
        r#"Shot,England,Kane,9,"[108.0, 40.0]",Goal,0.78,Penalty,Normal,Right Foot"#,
        r#"Ball Receipt*,England,Saka,10,"[90.0, 70.0]",,,,,"#,
        r#"Shot,England,Saka,80,"[102.0, 66.0]",Off T,,Open Play,Normal,Left Foot"#,
    ]
}

#[test]
fn csv_end_to_end() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("euros_2024_shot_map.csv");
    write_csv(&path, &sample_rows());

    let ds = load_file(&path).unwrap();
    assert_eq!(ds.len(), 6);
    assert_eq!(ds.report.rows_read, 8);
    assert_eq!(ds.report.bad_locations, 1);
    assert_eq!(ds.report.missing_xg, 1);

    let yamal = ds.shots.iter().find(|s| s.player == "Yamal").unwrap();
    assert_eq!(yamal.location, Coordinate::ORIGIN);
    let saka = ds.shots.iter().find(|s| s.player == "Saka").unwrap();
    assert_eq!(saka.xg, DEFAULT_XG);
}

#[test]
fn entry_point_builds_the_filtered_view() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("shots.csv");
    write_csv(&path, &sample_rows());

    let view = run(&path, &ShotFilter::new(Some("Spain"), Some("Morata"))).unwrap();
    assert_eq!(view.title, "Shot Map - Spain - Morata");
    assert_eq!(view.summary.shots, 3);
    assert_eq!(view.summary.goals, 2);
    assert!((view.summary.total_xg - 1.0).abs() < 1e-9);
    assert_eq!(view.shots.markers.len(), 3);
    assert!(view.shots.markers.last().unwrap().goal);

    let all = run(&path, &ShotFilter::new(Some("All Teams"), Some("All Players"))).unwrap();
    assert_eq!(all.summary.shots, 6);
    assert_eq!(all.team_options, ["England", "Spain"]);
    assert_eq!(all.load_report.bad_locations, 1);

    let conversion = all
        .player_rankings
        .iter()
        .find(|t| t.ranking == shot_map::stats::Ranking::ConversionRate)
        .unwrap();
    assert_eq!(conversion.rows.len(), 1);
    assert_eq!(conversion.rows[0].player, "Morata");
}

#[test]
fn missing_file_is_a_load_error() {
    let dir = TempDir::new().unwrap();
    let err = run(&dir.path().join("absent.csv"), &ShotFilter::default()).unwrap_err();
    assert!(format!("{err:#}").contains("absent.csv"));
}

#[test]
fn json_records_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("shots.json");
    fs::write(
        &path,
        r#"[
            {"type": "Shot", "team": "Italy", "player": "Barella", "minute": 11,
             "location": [104.0, 35.0], "shot_outcome": "Goal", "shot_statsbomb_xg": 0.21},
            {"type": "Pass", "team": "Italy", "player": "Jorginho", "minute": 12,
             "location": [60.0, 40.0], "shot_outcome": null}
        ]"#,
    )
    .unwrap();

    let ds = load_file(&path).unwrap();
    assert_eq!(ds.len(), 1);
    assert_eq!(ds.shots[0].location, Coordinate::new(104.0, 35.0));
}

#[test]
fn parquet_with_list_locations_loads() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("shots.parquet");

    let mut locations = ListBuilder::new(Float64Builder::new());
    for (x, y) in [(110.0, 38.0), (95.0, 50.0), (60.0, 40.0)] {
        locations.values().append_value(x);
        locations.values().append_value(y);
        locations.append(true);
    }

    let schema = Arc::new(Schema::new(vec![
        Field::new("type", DataType::Utf8, false),
        Field::new("team", DataType::Utf8, false),
        Field::new("player", DataType::Utf8, false),
        Field::new(
            "location",
            DataType::List(Arc::new(Field::new("item", DataType::Float64, true))),
            false,
        ),
        Field::new("shot_outcome", DataType::Utf8, true),
        Field::new("shot_statsbomb_xg", DataType::Float64, true),
    ]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(vec!["Shot", "Shot", "Pass"])),
            Arc::new(StringArray::from(vec!["Germany", "Germany", "Germany"])),
            Arc::new(StringArray::from(vec!["Musiala", "Wirtz", "Kroos"])),
            Arc::new(locations.finish()),
            Arc::new(StringArray::from(vec![Some("Goal"), Some("Saved"), None])),
            Arc::new(Float64Array::from(vec![Some(0.35), None, None])),
        ],
    )
    .unwrap();

    let file = fs::File::create(&path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    let ds = load_file(&path).unwrap();
    assert_eq!(ds.len(), 2);
    assert_eq!(ds.shots[0].location, Coordinate::new(110.0, 38.0));
    assert_eq!(ds.shots[0].xg, 0.35);
    assert!(ds.shots[0].is_goal());
    assert_eq!(ds.shots[1].xg, DEFAULT_XG);
    assert_eq!(ds.report.bad_locations, 0);
}

//! Integration tests for cs-output.

use cs_dist::{Distribution, DurationKey, DurationSampler};
use cs_sim::{ArrivalSchedule, NoopObserver, Params, Simulation, SimulationBuilder};

/// One patient, one team, one attending, every stage 5 long except the
/// zero-length team report.
fn finished_run() -> Simulation {
    let params = Params {
        n_patients:   1,
        n_teams:      1,
        n_attendings: 1,
        arrivals:     ArrivalSchedule::Explicit(vec![0.0]),
        seed:         Some(4),
        ..Params::default()
    };
    let durations = DurationSampler::constant(5.0)
        .with(DurationKey::ArrivalDelay, Distribution::Fixed(0.0))
        .with(DurationKey::Huddle, Distribution::Fixed(0.0))
        .with(DurationKey::TeamAttendingMeeting, Distribution::Fixed(0.0));
    let mut sim = SimulationBuilder::new(params).durations(durations).build().unwrap();
    sim.run(&mut NoopObserver).unwrap();
    sim
}

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use super::*;
    use crate::csv::CsvWriter;
    use crate::row::{MeetingRow, SummaryRow};
    use crate::writer::{write_run, OutputWriter};
    use crate::SimOutputObserver;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn records(path: &std::path::Path) -> Vec<csv::StringRecord> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.records().map(|r| r.unwrap()).collect()
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("timeline.csv").exists());
        assert!(dir.path().join("meetings.csv").exists());
        assert!(dir.path().join("summary.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("timeline.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, ["actor_id", "label", "kind", "state", "start", "end", "duration", "meeting_with"]);

        let mut rdr = csv::Reader::from_path(dir.path().join("summary.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, ["category", "ordinal", "wait"]);
    }

    #[test]
    fn finish_is_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn meeting_without_patient_leaves_field_empty() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        let row = MeetingRow { kind: "team_attending", first: 1, second: 2, patient: u32::MAX, start: 5.0, duration: 2.0 };
        w.write_meeting(&row).unwrap();
        w.finish().unwrap();

        let rows = records(&dir.path().join("meetings.csv"));
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "team_attending");
        assert_eq!(&rows[0][3], "");
        assert_eq!(&rows[0][4], "5");
    }

    #[test]
    fn full_run_writes_timeline_and_summary() {
        let dir = tmp();
        let sim = finished_run();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        write_run(&mut w, &sim).unwrap();

        let timeline = records(&dir.path().join("timeline.csv"));
        let patient: Vec<_> = timeline.iter().filter(|r| &r[2] == "PT").collect();
        assert_eq!(patient.len(), 8);
        assert_eq!(&patient[0][1], "PT 00");
        assert_eq!(&patient[0][3], "waiting_to_arrive");
        let last = patient[7].clone();
        assert_eq!(&last[3], "checked_out");
        assert_eq!(&last[4], "20");
        assert_eq!(&last[5], "");
        assert_eq!(&patient[3][3], "meeting_with_team");
        assert_eq!(&patient[3][7], "1");

        let summary = records(&dir.path().join("summary.csv"));
        assert_eq!(summary.len(), SummaryRow::from_summary(&sim.summary()).len());
        assert_eq!(&summary[0][0], "pt_wait_team");
    }

    #[test]
    fn observer_streams_meetings() {
        let dir = tmp();
        let params = Params { n_patients: 3, n_teams: 2, n_attendings: 1, seed: Some(9), ..Params::default() };
        let mut sim = SimulationBuilder::new(params).build().unwrap();
        let mut obs = SimOutputObserver::new(CsvWriter::new(dir.path()).unwrap());
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none());
        // Three meetings per patient.
        assert_eq!(obs.meetings_written(), 9);

        let mut w = obs.into_writer();
        write_run(&mut w, &sim).unwrap();
        assert_eq!(records(&dir.path().join("meetings.csv")).len(), 9);
    }
}

#[cfg(test)]
mod json_tests {
    use super::*;
    use crate::json::{write_json, write_run_json};

    #[test]
    fn run_json_files_parse_back() {
        let dir = tempfile::tempdir().unwrap();
        let sim = finished_run();
        write_run_json(dir.path(), &sim).unwrap();

        let text = std::fs::read_to_string(dir.path().join("timeline.json")).unwrap();
        let export: cs_sim::TimelineExport = serde_json::from_str(&text).unwrap();
        assert_eq!(export, sim.timeline_export());

        let text = std::fs::read_to_string(dir.path().join("summary.json")).unwrap();
        let summary: cs_sim::Summary = serde_json::from_str(&text).unwrap();
        assert_eq!(summary.end_time, 20.0);
    }

    #[test]
    fn seeded_runs_write_identical_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let write = |name: &str| {
            let mut sim = SimulationBuilder::new(Params::default().with_seed(21)).build().unwrap();
            sim.run(&mut NoopObserver).unwrap();
            let path = dir.path().join(name);
            write_json(&path, &sim.timeline_export()).unwrap();
            std::fs::read(path).unwrap()
        };
        assert_eq!(write("a.json"), write("b.json"));
    }

    #[test]
    fn missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = write_json(&dir.path().join("nope").join("x.json"), &1u8).unwrap_err();
        assert!(matches!(err, crate::OutputError::Io(_)));
    }
}

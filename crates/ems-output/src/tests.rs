//! Integration tests for ems-output.

#[cfg(test)]
mod csv_tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use tempfile::TempDir;

    use crate::csv::EpisodeCsvWriter;
    use crate::row::{EpisodeSummaryRow, StepRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn t(minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap().and_hms_opt(0, minute, 0).unwrap()
    }

    fn step_row(step: u64) -> StepRow {
        StepRow {
            step,
            datetime: t(step as u32),
            reward: -(step as f64),
            generated: 2,
            dispatched: 1,
            repositioned: 0,
            queued: step as u32,
        }
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = EpisodeCsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("step_log.csv").exists());
        assert!(dir.path().join("episode_summaries.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = EpisodeCsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("step_log.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(
            headers,
            ["step", "datetime", "reward", "generated", "dispatched", "repositioned", "queued"]
        );

        let mut rdr2 = csv::Reader::from_path(dir.path().join("episode_summaries.csv")).unwrap();
        let headers2: Vec<_> = rdr2.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers2, ["steps", "total_reward"]);
    }

    #[test]
    fn csv_step_round_trip() {
        let dir = tmp();
        let mut w = EpisodeCsvWriter::new(dir.path()).unwrap();
        w.write_step(&step_row(1)).unwrap();
        w.write_step(&step_row(2)).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("step_log.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "1"); // step
        assert_eq!(&rows[0][2], "-1"); // reward
        assert_eq!(&rows[1][0], "2");
        assert_eq!(&rows[1][6], "2"); // queued
    }

    #[test]
    fn csv_summary_round_trip() {
        let dir = tmp();
        let mut w = EpisodeCsvWriter::new(dir.path()).unwrap();
        w.write_summary(&EpisodeSummaryRow { steps: 1440, total_reward: -512.25 }).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("episode_summaries.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "1440");
        assert_eq!(&rows[0][1], "-512.25");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = EpisodeCsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap(); // second call should not panic
    }
}

#[cfg(test)]
mod observer_tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use tempfile::TempDir;

    use ems_env::{EnvObserver, StepInfo};

    use crate::csv::EpisodeCsvWriter;
    use crate::observer::EnvOutputObserver;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn t(minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap().and_hms_opt(0, minute, 0).unwrap()
    }

    #[test]
    fn observer_logs_steps_and_summary() {
        let dir = tmp();
        let writer = EpisodeCsvWriter::new(dir.path()).unwrap();
        let mut obs = EnvOutputObserver::new(writer);

        let info = StepInfo { generated: 3, dispatched: 2, repositioned: 1, queued: 4 };
        obs.on_step_end(1, t(1), -10.5, &info);
        obs.on_step_end(2, t(2), 0.0, &info);
        obs.on_episode_end(-10.5);
        assert!(obs.take_error().is_none(), "no write errors expected");

        let mut rdr = csv::Reader::from_path(dir.path().join("step_log.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][1], "2020-01-01 00:01:00");
        assert_eq!(&rows[0][2], "-10.5");
        assert_eq!(&rows[0][3], "3");
        assert_eq!(&rows[0][4], "2");
        assert_eq!(&rows[0][5], "1");
        assert_eq!(&rows[0][6], "4");

        let mut rdr2 = csv::Reader::from_path(dir.path().join("episode_summaries.csv")).unwrap();
        let rows2: Vec<_> = rdr2.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows2.len(), 1);
        assert_eq!(&rows2[0][0], "2");
        assert_eq!(&rows2[0][1], "-10.5");
    }
}

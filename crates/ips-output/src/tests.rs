//! Integration tests for ips-output.

use ips_core::{Field, SimConfig};

use crate::TableRow;

fn test_config(total_steps: u64) -> SimConfig {
    SimConfig {
        start_unix_secs:    1_700_000_000,
        tick_duration_secs: 60,
        total_steps,
        seed:               Some(3),
        grid_width:         8,
        grid_height:        8,
        track_positions:    true,
        update_interval_ms: None,
    }
}

fn table_row(tick: u64, fields: Vec<Field>) -> TableRow {
    TableRow {
        tick,
        unix_time_secs: 1_700_000_000 + tick as i64 * 60,
        fields,
    }
}

#[cfg(test)]
mod row_tests {
    use super::*;
    use crate::OutputError;

    #[test]
    fn timestamp_is_rfc3339_utc() {
        let row = table_row(0, vec![]);
        assert_eq!(row.timestamp_rfc3339().unwrap(), "2023-11-14T22:13:20Z");
    }

    #[test]
    fn timestamp_out_of_range_errors() {
        let row = TableRow { tick: 0, unix_time_secs: i64::MAX, fields: vec![] };
        assert!(matches!(row.timestamp_rfc3339(), Err(OutputError::Timestamp(_))));
    }
}

#[cfg(test)]
mod csv_tests {
    use ips_core::Column;
    use ips_sensor::{Record, StoreFloorRecord};
    use tempfile::TempDir;

    use super::*;
    use crate::writer::OutputWriter;
    use crate::{CsvWriter, OutputError};

    const COLUMNS: &[Column] = &[
        Column::float("level"),
        Column::integer("count"),
        Column::boolean("seen"),
    ];

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn read_back(bytes: Vec<u8>) -> (Vec<String>, Vec<csv::StringRecord>) {
        let mut rdr = csv::Reader::from_reader(bytes.as_slice());
        let headers = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        let rows = rdr.records().map(|r| r.unwrap()).collect();
        (headers, rows)
    }

    #[test]
    fn csv_file_created_with_header() {
        let dir = tmp();
        let path = dir.path().join("readings.csv");
        let mut w = CsvWriter::create(&path, StoreFloorRecord::COLUMNS).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(
            headers,
            ["tick", "timestamp", "rotation", "foot_traffic", "item_picked_up", "movement_detected"]
        );
    }

    #[test]
    fn cells_are_formatted() {
        let mut w = CsvWriter::from_writer(Vec::new(), COLUMNS).unwrap();
        w.write_row(&table_row(0, vec![Field::Float(1.5), Field::Integer(7), Field::Boolean(true)]))
            .unwrap();
        w.write_row(&table_row(1, vec![Field::Empty, Field::Integer(0), Field::Boolean(false)]))
            .unwrap();
        w.finish().unwrap();

        let (headers, rows) = read_back(w.into_inner().unwrap());
        assert_eq!(headers, ["tick", "timestamp", "level", "count", "seen"]);
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][1], "2023-11-14T22:13:20Z");
        assert_eq!(&rows[0][2], "1.5");
        assert_eq!(&rows[0][3], "7");
        assert_eq!(&rows[0][4], "1");
        assert_eq!(&rows[1][0], "1");
        assert_eq!(&rows[1][1], "2023-11-14T22:14:20Z");
        assert_eq!(&rows[1][2], "");
        assert_eq!(&rows[1][4], "0");
    }

    #[test]
    fn wrong_field_count_rejected() {
        let mut w = CsvWriter::from_writer(Vec::new(), COLUMNS).unwrap();
        let err = w.write_row(&table_row(0, vec![Field::Float(1.0)])).unwrap_err();
        assert!(matches!(err, OutputError::SchemaMismatch { expected: 3, got: 1 }));
    }

    #[test]
    fn csv_finish_idempotent() {
        let mut w = CsvWriter::from_writer(Vec::new(), COLUMNS).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }
}

#[cfg(test)]
mod observer_tests {
    use ips_sensor::{CustomerSuite, Record, TrackingRecord, TrackingSuite};
    use ips_sim::{simulate, SimBuilder};

    use super::*;
    use crate::writer::OutputWriter;
    use crate::{export_store, CsvWriter, OutputError, OutputResult, SimOutputObserver};

    /// Fails every write after the first `ok` rows.
    struct FlakyWriter {
        ok:       usize,
        written:  usize,
        finished: u32,
    }

    impl OutputWriter for FlakyWriter {
        fn write_row(&mut self, _row: &TableRow) -> OutputResult<()> {
            if self.written == self.ok {
                return Err(OutputError::SchemaMismatch { expected: 0, got: self.written });
            }
            self.written += 1;
            Ok(())
        }

        fn finish(&mut self) -> OutputResult<()> {
            self.finished += 1;
            Ok(())
        }
    }

    #[test]
    fn observer_streams_every_row() {
        let size = test_config(1).grid_size().unwrap();
        let suite = TrackingSuite::for_grid(size).unwrap();
        let mut sim = SimBuilder::new(test_config(25), suite).build().unwrap();

        let writer = CsvWriter::from_writer(Vec::new(), TrackingRecord::COLUMNS).unwrap();
        let mut obs = SimOutputObserver::new(writer);
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none());
        assert_eq!(obs.rows_written(), 25);

        let bytes = obs.into_writer().into_inner().unwrap();
        let mut rdr = csv::Reader::from_reader(bytes.as_slice());
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 25);
        // Tracking on: every position and RSSI cell is filled.
        assert!(rows.iter().all(|r| r.iter().all(|cell| !cell.is_empty())));
    }

    #[test]
    fn observer_keeps_first_error() {
        let mut sim = SimBuilder::new(test_config(5), CustomerSuite::default()).build().unwrap();
        let mut obs = SimOutputObserver::new(FlakyWriter { ok: 2, written: 0, finished: 0 });
        sim.run(&mut obs).unwrap();

        let err = obs.take_error().expect("third write fails");
        assert!(matches!(err, OutputError::SchemaMismatch { got: 2, .. }));
        assert!(obs.take_error().is_none());
        assert_eq!(obs.rows_written(), 2);
        assert_eq!(obs.into_writer().finished, 1);
    }

    #[test]
    fn export_store_writes_all_rows() {
        let out = simulate(test_config(12), CustomerSuite::default()).unwrap();
        let mut w = CsvWriter::from_writer(Vec::new(), ips_sensor::CustomerRecord::COLUMNS).unwrap();
        assert_eq!(export_store(&out.store, &mut w).unwrap(), 12);

        let bytes = w.into_inner().unwrap();
        let mut rdr = csv::Reader::from_reader(bytes.as_slice());
        assert_eq!(rdr.records().count(), 12);
    }

    #[test]
    fn export_matches_live_output() {
        let mut sim = SimBuilder::new(test_config(9), CustomerSuite::default()).build().unwrap();
        let cols = ips_sensor::CustomerRecord::COLUMNS;
        let mut obs = SimOutputObserver::new(CsvWriter::from_writer(Vec::new(), cols).unwrap());
        sim.run(&mut obs).unwrap();
        let live = obs.into_writer().into_inner().unwrap();

        let out = sim.finish();
        let mut w = CsvWriter::from_writer(Vec::new(), cols).unwrap();
        export_store(&out.store, &mut w).unwrap();
        assert_eq!(live, w.into_inner().unwrap());
    }
}

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use ips_sensor::{Record, TrackingRecord, TrackingSuite};
    use ips_sim::SimBuilder;
    use tempfile::TempDir;

    use super::*;
    use crate::sqlite::{SqliteWriter, TABLE};
    use crate::writer::OutputWriter;
    use crate::SimOutputObserver;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn sqlite_db_created() {
        let dir = tmp();
        let path = dir.path().join("output.db");
        let mut w = SqliteWriter::create(&path, TrackingRecord::COLUMNS).unwrap();
        w.finish().unwrap();
        assert!(path.exists());
    }

    #[test]
    fn sqlite_row_count_and_types() {
        let dir = tmp();
        let path = dir.path().join("output.db");
        let size = test_config(1).grid_size().unwrap();
        let mut sim = SimBuilder::new(test_config(10), TrackingSuite::for_grid(size).unwrap())
            .build()
            .unwrap();
        let writer = SqliteWriter::create(&path, TrackingRecord::COLUMNS).unwrap();
        let mut obs = SimOutputObserver::new(writer);
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none());

        let conn = rusqlite::Connection::open(&path).unwrap();
        let count: i64 = conn
            .query_row(&format!("SELECT COUNT(*) FROM {TABLE}"), [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 10);

        let (gyro, rfid): (String, String) = conn
            .query_row(
                &format!("SELECT typeof(gyroscope_x), typeof(rfid_detected) FROM {TABLE} LIMIT 1"),
                [],
                |r| Ok((r.get(0)?, r.get(1)?)),
            )
            .unwrap();
        assert_eq!(gyro, "real");
        assert_eq!(rfid, "integer");
    }

    #[test]
    fn sqlite_second_export_replaces_first() {
        use ips_sensor::CustomerRecord;
        use ips_sim::simulate;

        use crate::export_store;

        let dir = tmp();
        let path = dir.path().join("output.db");
        let first = simulate(test_config(6), ips_sensor::CustomerSuite::default()).unwrap();
        let second = simulate(test_config(4), ips_sensor::CustomerSuite::default()).unwrap();

        let mut w = SqliteWriter::create(&path, CustomerRecord::COLUMNS).unwrap();
        export_store(&first.store, &mut w).unwrap();
        drop(w);
        let mut w = SqliteWriter::create(&path, CustomerRecord::COLUMNS).unwrap();
        assert_eq!(export_store(&second.store, &mut w).unwrap(), 4);

        let count: i64 = w
            .connection()
            .query_row(&format!("SELECT COUNT(*) FROM {TABLE}"), [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 4);
    }

    #[test]
    fn sqlite_empty_field_is_null() {
        let dir = tmp();
        let path = dir.path().join("output.db");
        let mut w = SqliteWriter::create(&path, TrackingRecord::COLUMNS).unwrap();
        let mut fields = vec![Field::Float(0.1); 3];
        fields.extend([Field::Boolean(true), Field::Boolean(false)]);
        fields.extend([Field::Empty; 4]);
        w.write_row(&table_row(0, fields)).unwrap();
        w.finish().unwrap();

        let nulls: i64 = w
            .connection()
            .query_row(
                &format!("SELECT COUNT(*) FROM {TABLE} WHERE position_x IS NULL AND rssi_dbm IS NULL"),
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(nulls, 1);
    }
}

//! Export shapes and the file export sink.
//!
//! The export records keep the original widget's Spanish field names
//! (`vuelta`, `duracionVuelta`, ...) so exported files stay compatible.
//! Export is a fire-and-forget port: callers discard failures.

use std::path::PathBuf;

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::format;
use crate::storage::StopwatchSession;
use crate::timer::Lap;

/// Single-lap export record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LapExport {
    pub vuelta: u32,
    pub nombre: String,
    pub fecha: String,
    pub hora: String,
    #[serde(rename = "duracionVuelta")]
    pub duracion_vuelta: String,
    #[serde(rename = "tiempoTotal")]
    pub tiempo_total: String,
}

impl LapExport {
    pub fn new<Tz: TimeZone>(lap: &Lap, show_hundredths: bool, at: &DateTime<Tz>) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self {
            vuelta: lap.index,
            nombre: lap.name.clone(),
            fecha: format::long_date_es(at),
            hora: format::time_of_day(at),
            duracion_vuelta: format::stopwatch(lap.delta_ms, show_hundredths),
            tiempo_total: format::stopwatch(lap.cumulative_ms, show_hundredths),
        }
    }
}

/// Export sink port.
pub trait Exporter {
    /// # Errors
    /// Returns an error if the sink fails; callers ignore it.
    fn export_lap(&self, lap: &LapExport) -> Result<(), Box<dyn std::error::Error>>;

    /// # Errors
    /// Returns an error if the sink fails.
    fn export_session(&self, session: &StopwatchSession) -> Result<(), Box<dyn std::error::Error>>;

    /// # Errors
    /// Returns an error if the sink fails.
    fn export_history(
        &self,
        sessions: &[StopwatchSession],
    ) -> Result<(), Box<dyn std::error::Error>>;
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopExporter;

impl Exporter for NoopExporter {
    fn export_lap(&self, _lap: &LapExport) -> Result<(), Box<dyn std::error::Error>> {
        Ok(())
    }

    fn export_session(
        &self,
        _session: &StopwatchSession,
    ) -> Result<(), Box<dyn std::error::Error>> {
        Ok(())
    }

    fn export_history(
        &self,
        _sessions: &[StopwatchSession],
    ) -> Result<(), Box<dyn std::error::Error>> {
        Ok(())
    }
}

/// Writes pretty JSON files under an export directory, the file-download
/// analog of the original widget.
#[derive(Debug, Clone)]
pub struct JsonFileExporter {
    dir: PathBuf,
}

impl JsonFileExporter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Exporter rooted at `<data dir>/exports/`.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created.
    pub fn open_default() -> Result<Self, StorageError> {
        let dir = crate::storage::data_dir()?.join("exports");
        std::fs::create_dir_all(&dir).map_err(|e| StorageError::DataDir(e.to_string()))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }

    fn write<T: Serialize>(&self, name: &str, value: &T) -> Result<(), Box<dyn std::error::Error>> {
        let content = serde_json::to_string_pretty(value)?;
        std::fs::write(self.dir.join(name), content)?;
        Ok(())
    }

    fn stamp() -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

impl Exporter for JsonFileExporter {
    fn export_lap(&self, lap: &LapExport) -> Result<(), Box<dyn std::error::Error>> {
        self.write(&format!("vuelta_{}_{}.json", lap.vuelta, Self::stamp()), lap)
    }

    fn export_session(&self, session: &StopwatchSession) -> Result<(), Box<dyn std::error::Error>> {
        self.write(&format!("sesion_{}.json", session.id), session)
    }

    fn export_history(
        &self,
        sessions: &[StopwatchSession],
    ) -> Result<(), Box<dyn std::error::Error>> {
        self.write(
            &format!("historial_completo_{}.json", Self::stamp()),
            &sessions,
        )
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use std::cell::RefCell;

    /// Collects exported laps; optionally fails to prove callers swallow
    /// errors.
    #[derive(Debug, Default)]
    pub struct RecordingExporter {
        pub laps: RefCell<Vec<LapExport>>,
        pub fail: bool,
    }

    impl Exporter for RecordingExporter {
        fn export_lap(&self, lap: &LapExport) -> Result<(), Box<dyn std::error::Error>> {
            self.laps.borrow_mut().push(lap.clone());
            if self.fail {
                return Err("disk full".into());
            }
            Ok(())
        }

        fn export_session(
            &self,
            _session: &StopwatchSession,
        ) -> Result<(), Box<dyn std::error::Error>> {
            Ok(())
        }

        fn export_history(
            &self,
            _sessions: &[StopwatchSession],
        ) -> Result<(), Box<dyn std::error::Error>> {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn lap() -> Lap {
        Lap {
            index: 2,
            cumulative_ms: 8_000,
            delta_ms: 3_000,
            name: "Vuelta 2".into(),
        }
    }

    #[test]
    fn lap_export_shape() {
        let at = Utc.with_ymd_and_hms(2026, 3, 14, 15, 9, 26).unwrap();
        let export = LapExport::new(&lap(), true, &at);
        assert_eq!(export.vuelta, 2);
        assert_eq!(export.nombre, "Vuelta 2");
        assert_eq!(export.fecha, "14 de marzo de 2026");
        assert_eq!(export.hora, "15:09:26");
        assert_eq!(export.duracion_vuelta, "00:03:00");
        assert_eq!(export.tiempo_total, "00:08:00");
    }

    #[test]
    fn lap_export_wire_names_are_spanish() {
        let at = Utc.with_ymd_and_hms(2026, 3, 14, 15, 9, 26).unwrap();
        let json = serde_json::to_value(LapExport::new(&lap(), false, &at)).unwrap();
        assert!(json.get("vuelta").is_some());
        assert!(json.get("duracionVuelta").is_some());
        assert!(json.get("tiempoTotal").is_some());
    }

    #[test]
    fn file_exporter_writes_lap_and_history_files() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = JsonFileExporter::new(dir.path().to_path_buf());
        let at = Utc.with_ymd_and_hms(2026, 3, 14, 15, 9, 26).unwrap();

        exporter.export_lap(&LapExport::new(&lap(), true, &at)).unwrap();
        exporter.export_history(&[]).unwrap();

        let names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert!(names.iter().any(|n| n.starts_with("vuelta_2_")));
        assert!(names.iter().any(|n| n.starts_with("historial_completo_")));
    }
}

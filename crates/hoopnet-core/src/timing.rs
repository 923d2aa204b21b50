use std::time::{Duration, Instant};

use serde::Serialize;
use serde_json::json;

/// Wall-clock duration of one named pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageTiming {
    pub name: String,
    #[serde(rename = "elapsed_us", serialize_with = "serialize_micros")]
    pub elapsed: Duration,
}

/// Records stage durations in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageTimer {
    stages: Vec<StageTiming>,
}

impl StageTimer {
    #[must_use]
    pub const fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Run `f`, recording its duration under `name`.
    pub fn time<R>(&mut self, name: &str, f: impl FnOnce() -> R) -> R {
        let started = Instant::now();
        let result = f();
        self.stages.push(StageTiming {
            name: name.to_string(),
            elapsed: started.elapsed(),
        });
        result
    }

    /// Append another timer's stages after this one's.
    pub fn extend(&mut self, other: &Self) {
        self.stages.extend(other.stages.iter().cloned());
    }

    #[must_use]
    pub fn stages(&self) -> &[StageTiming] {
        &self.stages
    }

    #[must_use]
    pub fn total(&self) -> Duration {
        self.stages.iter().map(|s| s.elapsed).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "stages": self.stages,
            "total_us": micros_u64(self.total()),
        })
    }

    /// Render the stages as a table for terminal output.
    #[must_use]
    pub fn display_table(&self) -> String {
        if self.stages.is_empty() {
            return "No timing samples recorded.".to_string();
        }

        let mut out = String::new();
        out.push_str("stage                 elapsed\n");
        out.push_str("-----------------------------\n");
        for stage in &self.stages {
            out.push_str(&format!(
                "{:<16} {:>12}\n",
                stage.name,
                format_duration(stage.elapsed)
            ));
        }
        out.push_str(&format!(
            "{:<16} {:>12}\n",
            "total",
            format_duration(self.total())
        ));
        out
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn serialize_micros<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(micros_u64(*d))
}

fn micros_u64(d: Duration) -> u64 {
    u64::try_from(d.as_micros()).unwrap_or(u64::MAX)
}

fn format_duration(duration: Duration) -> String {
    let micros = duration.as_micros();

    if micros >= 1_000_000 {
        let secs = micros / 1_000_000;
        let millis = (micros % 1_000_000) / 1_000;
        format!("{secs}.{millis:03}s")
    } else if micros >= 1_000 {
        let millis = micros / 1_000;
        let rem = micros % 1_000;
        format!("{millis}.{rem:03}ms")
    } else {
        format!("{micros}us")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_stages_in_order_and_returns_value() {
        let mut timer = StageTimer::new();
        let a = timer.time("build", || 2 + 2);
        let b = timer.time("rank", || "done");
        assert_eq!(a, 4);
        assert_eq!(b, "done");

        let names: Vec<&str> = timer.stages().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["build", "rank"]);
    }

    #[test]
    fn extend_appends_in_order() {
        let mut outer = StageTimer::new();
        outer.time("load", || ());
        let mut inner = StageTimer::new();
        inner.time("build", || ());
        inner.time("rank", || ());
        outer.extend(&inner);
        let names: Vec<&str> = outer.stages().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["load", "build", "rank"]);
    }

    #[test]
    fn json_has_stage_entries() {
        let mut timer = StageTimer::new();
        timer.time("pagerank", || ());
        let value = timer.to_json();
        assert_eq!(value["stages"][0]["name"], "pagerank");
        assert!(value["stages"][0]["elapsed_us"].is_u64());
        assert!(value["total_us"].is_u64());
    }

    #[test]
    fn duration_formatting() {
        assert_eq!(format_duration(Duration::from_micros(250)), "250us");
        assert_eq!(format_duration(Duration::from_micros(1_250)), "1.250ms");
        assert_eq!(format_duration(Duration::from_micros(2_005_000)), "2.005s");
    }

    #[test]
    fn empty_table_message() {
        assert_eq!(StageTimer::new().display_table(), "No timing samples recorded.");
    }
}

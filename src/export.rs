use std::{fs, path::Path};

use anyhow::Context;
use chrono::{DateTime, TimeZone};
use tracing::info;

use crate::plan::FloorPlan;
use crate::render::emoji_grid;

pub fn default_file_name<Tz: TimeZone>(now: &DateTime<Tz>, extension: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("floorplan-{}.{extension}", now.format("%Y%m%d-%H%M%S"))
}

pub fn write_json(path: &Path, json: &str) -> anyhow::Result<()> {
    fs::write(path, json).with_context(|| format!("Export failed: {}", path.display()))?;
    info!(path = %path.display(), "exported floor plan JSON");
    Ok(())
}

pub fn write_emoji(path: &Path, plan: &FloorPlan) -> anyhow::Result<()> {
    let mut body = emoji_grid(plan);
    body.push('\n');
    fs::write(path, body).with_context(|| format!("Export failed: {}", path.display()))?;
    info!(path = %path.display(), "exported emoji grid");
    Ok(())
}

pub fn read_plan(path: &Path) -> anyhow::Result<FloorPlan> {
    let text =
        fs::read_to_string(path).with_context(|| format!("Load failed: {}", path.display()))?;
    let plan = FloorPlan::from_json(&text)
        .with_context(|| format!("Parse failed: {}", path.display()))?;
    info!(path = %path.display(), rows = plan.rows(), cols = plan.cols(), "imported floor plan");
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellTag;
    use crate::plan::GridPos;
    use chrono::{TimeZone, Utc};
    use std::path::PathBuf;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("floorplan-studio-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir.join(name)
    }

    #[test]
    fn file_name_carries_timestamp() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 30).unwrap();
        assert_eq!(default_file_name(&at, "json"), "floorplan-20240309-140530.json");
        assert_eq!(default_file_name(&at, "txt"), "floorplan-20240309-140530.txt");
    }

    #[test]
    fn exported_json_imports_back() {
        let mut plan = FloorPlan::create(4, 5);
        plan.apply(CellTag::Gateway, GridPos::new(0, 4)).unwrap();
        plan.apply(CellTag::Sensor, GridPos::new(3, 0)).unwrap();
        let path = scratch("roundtrip.json");

        write_json(&path, &plan.to_json().unwrap()).unwrap();
        assert_eq!(read_plan(&path).unwrap(), plan);
    }

    #[test]
    fn emoji_export_ends_with_newline() {
        let plan = FloorPlan::create(3, 3);
        let path = scratch("plan.txt");
        write_emoji(&path, &plan).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 3);
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn invalid_file_reports_path() {
        let path = scratch("broken.json");
        fs::write(&path, "{\"rows\": 3}").unwrap();
        let err = read_plan(&path).unwrap_err();
        assert!(err.to_string().starts_with("Parse failed"));
        assert!(err.to_string().contains("broken.json"));
    }
}

use std::io::Write;

use anyhow::Result;
use colored::Colorize;

use crate::live::render_line;
use crate::simulation::SimulationReport;
use crate::util::format_instant;

/// Write the report as pretty JSON.
pub fn generate_json_report<W: Write>(writer: &mut W, report: &SimulationReport) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, report)?;
    writeln!(writer)?;
    Ok(())
}

pub fn generate_markdown_report<W: Write>(
    writer: &mut W,
    report: &SimulationReport,
) -> Result<()> {
    writeln!(writer, "# Countdown Simulation\n")?;
    writeln!(writer, "- Start: {}", format_instant(report.start_ms))?;
    writeln!(writer, "- Target: {}", format_instant(report.target_ms))?;
    writeln!(writer, "- Tick period: {} ms", report.tick_period_ms)?;
    writeln!(writer, "- Completed: {}", report.completed)?;
    writeln!(writer, "- Particles spawned: {}", report.particles_spawned)?;
    writeln!(writer, "- Emphasis flags: {}\n", report.emphasis_flags)?;
    writeln!(
        writer,
        "| Tick | At | Days | Hours | Minutes | Seconds | Progress | Message |"
    )?;
    writeln!(
        writer,
        "|------|----|------|-------|---------|---------|----------|---------|"
    )?;
    for record in &report.records {
        let s = &record.surfaces;
        let cell = |v: &Option<String>| v.clone().unwrap_or_default();
        writeln!(
            writer,
            "| {} | {} | {} | {} | {} | {} | {} | {} |",
            record.tick,
            record.at,
            cell(&s.days),
            cell(&s.hours),
            cell(&s.minutes),
            cell(&s.seconds),
            cell(&s.progress),
            cell(&s.message)
        )?;
    }
    Ok(())
}

pub fn generate_console_report<W: Write>(writer: &mut W, report: &SimulationReport) -> Result<()> {
    writeln!(
        writer,
        "🎯 Target {}  (start {})",
        format_instant(report.target_ms).bright_cyan(),
        format_instant(report.start_ms)
    )?;
    for record in &report.records {
        writeln!(
            writer,
            "{:>4}  {}  {}",
            record.tick.to_string().dimmed(),
            record.at,
            render_line(&record.surfaces)
        )?;
    }
    let status = if report.completed {
        "🎉 Countdown completed".green().bold()
    } else {
        "⏳ Countdown still running".yellow().bold()
    };
    writeln!(writer, "{status}")?;
    writeln!(
        writer,
        "   {} particles spawned, {} emphasis flags",
        report.particles_spawned, report.emphasis_flags
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::run_simulation;
    use countdown_core::CountdownConfig;

    fn sample() -> SimulationReport {
        run_simulation(CountdownConfig::with_instants(0, 120_000), 118_000, 5)
    }

    #[test]
    fn json_report_round_trips_through_value() {
        let mut out = Vec::new();
        generate_json_report(&mut out, &sample()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["records"].as_array().map(Vec::len), Some(6));
        assert_eq!(value["completed"], serde_json::Value::Bool(true));
        assert_eq!(value["records"][5]["surfaces"]["progress"], "100%");
    }

    #[test]
    fn markdown_report_has_table_rows() {
        let mut out = Vec::new();
        generate_markdown_report(&mut out, &sample()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("# Countdown Simulation"));
        assert_eq!(text.lines().filter(|l| l.starts_with("| ")).count(), 7);
    }

    #[test]
    fn console_report_states_outcome() {
        colored::control::set_override(false);
        let mut out = Vec::new();
        generate_console_report(&mut out, &sample()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Countdown completed"));
        assert!(text.contains("20 particles spawned"));
    }
}

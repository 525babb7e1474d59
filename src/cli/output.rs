/// Output writers: JSON, CSV and text renderers, schedule listing, errors.
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use comfy_table::{Table, presets::UTF8_BORDERS_ONLY};

use super::args::OutputFormat;
use crate::commands::render::{Payload, Render, RenderRequest};
use crate::filing::{FilingError, Standardizer};
use crate::types::{ErrorOutput, ParsedFiling, ScheduleResult};

/// Open `outfile` for writing (truncating), or stdout when absent.
fn open_sink(outfile: Option<&Path>) -> Result<Box<dyn Write>, FilingError> {
    Ok(match outfile {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(std::io::stdout().lock()),
    })
}

/// Renderers writing to stdout or to the requested file.
#[derive(Debug, Default, Clone, Copy)]
pub struct Writers;

impl Render for Writers {
    fn render(&self, format: OutputFormat, request: &RenderRequest<'_>) -> Result<(), FilingError> {
        let mismatch = |reason: &str| FilingError::RenderContract {
            format,
            reason: reason.to_owned(),
        };

        match format {
            OutputFormat::Json => {
                let Payload::Data(results) = request.payload else {
                    return Err(mismatch("expected extracted schedules, got a full filing"));
                };
                if request.object_id.is_some()
                    || request.standardizer.is_some()
                    || request.documentation.is_some()
                {
                    return Err(mismatch("takes no object id, standardizer or xpath flag"));
                }
                to_json(results, request.outfile)
            }
            OutputFormat::Csv => {
                let Payload::Filing(parsed) = request.payload else {
                    return Err(mismatch("expected a full filing"));
                };
                to_csv(
                    parsed,
                    request.object_id.ok_or_else(|| mismatch("missing object id"))?,
                    request
                        .standardizer
                        .ok_or_else(|| mismatch("missing standardizer"))?,
                    request
                        .documentation
                        .ok_or_else(|| mismatch("missing xpath flag"))?,
                    request.outfile,
                )
            }
            OutputFormat::Txt => {
                let Payload::Filing(parsed) = request.payload else {
                    return Err(mismatch("expected a full filing"));
                };
                if request.object_id.is_some() {
                    return Err(mismatch("takes no object id"));
                }
                to_txt(
                    parsed,
                    request
                        .standardizer
                        .ok_or_else(|| mismatch("missing standardizer"))?,
                    request
                        .documentation
                        .ok_or_else(|| mismatch("missing xpath flag"))?,
                    request.outfile,
                )
            }
        }
    }
}

// --- JSON ---

/// Write schedules as a pretty-printed JSON array.
///
/// # Errors
///
/// Serialization or I/O failure.
pub fn to_json(results: &[ScheduleResult], outfile: Option<&Path>) -> Result<(), FilingError> {
    let mut sink = open_sink(outfile)?;
    serde_json::to_writer_pretty(&mut sink, results)?;
    writeln!(sink)?;
    sink.flush()?;
    Ok(())
}

// --- CSV ---

/// Write one CSV row per field.
///
/// Columns: `object_id,form,variable,value`, plus `xpath` when `documentation`.
///
/// # Errors
///
/// Serialization or I/O failure.
pub fn to_csv(
    parsed: &ParsedFiling,
    object_id: &str,
    standardizer: &dyn Standardizer,
    documentation: bool,
    outfile: Option<&Path>,
) -> Result<(), FilingError> {
    let mut wtr = csv::Writer::from_writer(open_sink(outfile)?);

    let mut header = vec!["object_id", "form", "variable", "value"];
    if documentation {
        header.push("xpath");
    }
    wtr.write_record(&header)?;

    for sked in &parsed.results {
        for field in &sked.fields {
            let label = standardizer.label(&field.xpath);
            let mut row = vec![
                object_id,
                sked.schedule_name.as_str(),
                label.as_str(),
                field.value.as_str(),
            ];
            if documentation {
                row.push(field.xpath.as_str());
            }
            wtr.write_record(&row)?;
        }
    }

    wtr.flush()?;
    Ok(())
}

// --- Text ---

/// Write a heading and a label/value table per schedule.
///
/// # Errors
///
/// I/O failure.
pub fn to_txt(
    parsed: &ParsedFiling,
    standardizer: &dyn Standardizer,
    documentation: bool,
    outfile: Option<&Path>,
) -> Result<(), FilingError> {
    let mut sink = open_sink(outfile)?;

    if parsed.results.is_empty() {
        writeln!(sink, "No schedules found.")?;
    }

    for sked in &parsed.results {
        writeln!(sink, "\nSchedule: {}", sked.schedule_name)?;

        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY);
        if documentation {
            table.set_header(["VARIABLE", "VALUE", "XPATH"]);
        } else {
            table.set_header(["VARIABLE", "VALUE"]);
        }
        for field in &sked.fields {
            let label = standardizer.label(&field.xpath);
            if documentation {
                table.add_row([label.as_str(), field.value.as_str(), field.xpath.as_str()]);
            } else {
                table.add_row([label.as_str(), field.value.as_str()]);
            }
        }
        writeln!(sink, "{table}")?;
    }

    sink.flush()?;
    Ok(())
}

// --- Schedule listing ---

/// Write schedule names, one per line.
///
/// # Errors
///
/// I/O failure.
pub fn write_schedule_list(names: &[String], out: &mut dyn Write) -> Result<(), FilingError> {
    for name in names {
        writeln!(out, "{name}")?;
    }
    Ok(())
}

// --- Error output ---

/// Write a structured error to stderr.
pub fn write_error(err: &ErrorOutput, format: OutputFormat) {
    let stderr = std::io::stderr();
    let mut out = stderr.lock();
    match format {
        OutputFormat::Json => {
            let s = serde_json::to_string_pretty(err).unwrap_or_default();
            let _ = writeln!(out, "{s}");
        }
        OutputFormat::Csv | OutputFormat::Txt => {
            let _ = writeln!(out, "Error: {}", err.error.message);
        }
    }
}

// --- Debug timer ---

/// A RAII timer that prints elapsed milliseconds to stderr on drop.
///
/// Created via [`RunOptions::timer`](crate::commands::RunOptions::timer). Does
/// nothing when `debug` is false.
pub struct DebugTimer {
    label: &'static str,
    start: std::time::Instant,
    active: bool,
}

impl DebugTimer {
    #[must_use]
    pub(crate) fn new(label: &'static str, active: bool) -> Self {
        Self {
            label,
            start: std::time::Instant::now(),
            active,
        }
    }
}

impl Drop for DebugTimer {
    fn drop(&mut self) {
        if self.active {
            let ms = self.start.elapsed().as_secs_f64() * 1000.0;
            eprintln!("[debug] {}: {ms:.2}ms", self.label);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filing::XpathStandardizer;
    use crate::types::FieldValue;

    fn parsed() -> ParsedFiling {
        ParsedFiling {
            object_id: "93432084004350".to_owned(),
            results: vec![ScheduleResult {
                schedule_name: "IRS990".to_owned(),
                fields: vec![
                    FieldValue {
                        xpath: "/Return/ReturnData/IRS990/TotalRevenueAmt".to_owned(),
                        value: "125000".to_owned(),
                    },
                    FieldValue {
                        xpath: "/Return/ReturnData/IRS990/MissionDesc".to_owned(),
                        value: "Feeding, housing".to_owned(),
                    },
                ],
            }],
        }
    }

    #[test]
    fn test_json_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let p = parsed();
        to_json(p.get_result(), Some(path.as_path())).unwrap();
        let written: Vec<ScheduleResult> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, p.results);
    }

    #[test]
    fn test_csv_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        to_csv(&parsed(), "93432084004350", &XpathStandardizer, false, Some(path.as_path())).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "object_id,form,variable,value");
        assert_eq!(lines[1], "93432084004350,IRS990,Total Revenue Amt,125000");
        assert_eq!(lines[2], "93432084004350,IRS990,Mission Desc,\"Feeding, housing\"");
    }

    #[test]
    fn test_csv_with_xpath_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        to_csv(&parsed(), "x", &XpathStandardizer, true, Some(path.as_path())).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "object_id,form,variable,value,xpath");
        assert!(lines[1].ends_with(",/Return/ReturnData/IRS990/TotalRevenueAmt"));
    }

    #[test]
    fn test_txt_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        to_txt(&parsed(), &XpathStandardizer, true, Some(path.as_path())).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("Schedule: IRS990"));
        assert!(text.contains("Total Revenue Amt"));
        assert!(text.contains("/Return/ReturnData/IRS990/MissionDesc"));
    }

    #[test]
    fn test_txt_empty_filing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let empty = ParsedFiling {
            object_id: "1".to_owned(),
            results: Vec::new(),
        };
        to_txt(&empty, &XpathStandardizer, false, Some(path.as_path())).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "No schedules found.\n");
    }

    #[test]
    fn test_writers_csv_uses_request_object_id() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let p = parsed();
        let request = RenderRequest {
            payload: Payload::Filing(&p),
            object_id: Some("201642229349300909"),
            standardizer: Some(&XpathStandardizer),
            documentation: Some(false),
            outfile: Some(path.as_path()),
        };
        Writers.render(OutputFormat::Csv, &request).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.lines().nth(1).unwrap().starts_with("201642229349300909,"));
    }

    #[test]
    fn test_schedule_list() {
        let mut out: Vec<u8> = Vec::new();
        write_schedule_list(&["ReturnHeader990x".to_owned(), "IRS990".to_owned()], &mut out)
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "ReturnHeader990x\nIRS990\n");
    }

    fn request<'a>(payload: Payload<'a>, outfile: &'a Path) -> RenderRequest<'a> {
        RenderRequest {
            payload,
            object_id: None,
            standardizer: None,
            documentation: None,
            outfile: Some(outfile),
        }
    }

    #[test]
    fn test_writers_json_writes_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let p = parsed();
        Writers
            .render(OutputFormat::Json, &request(Payload::Data(p.get_result()), &path))
            .unwrap();
        let written: Vec<ScheduleResult> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, p.results);
    }

    #[test]
    fn test_writers_json_rejects_full_filing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let p = parsed();
        let err = Writers
            .render(OutputFormat::Json, &request(Payload::Filing(&p), &path))
            .unwrap_err();
        assert!(matches!(
            err,
            FilingError::RenderContract {
                format: OutputFormat::Json,
                ..
            }
        ));
        assert!(!path.exists(), "nothing written on a mismatched request");
    }

    #[test]
    fn test_writers_csv_requires_object_id_and_standardizer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let p = parsed();
        let mut req = request(Payload::Filing(&p), &path);
        req.documentation = Some(false);
        req.standardizer = Some(&XpathStandardizer);
        assert!(matches!(
            Writers.render(OutputFormat::Csv, &req),
            Err(FilingError::RenderContract { .. })
        ));
        req.object_id = Some("1");
        req.standardizer = None;
        assert!(matches!(
            Writers.render(OutputFormat::Csv, &req),
            Err(FilingError::RenderContract { .. })
        ));
    }

    #[test]
    fn test_writers_txt_rejects_object_id_and_data_payload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let p = parsed();
        let mut req = request(Payload::Filing(&p), &path);
        req.standardizer = Some(&XpathStandardizer);
        req.documentation = Some(true);
        req.object_id = Some("1");
        assert!(Writers.render(OutputFormat::Txt, &req).is_err());
        req.object_id = None;
        req.payload = Payload::Data(p.get_result());
        assert!(Writers.render(OutputFormat::Txt, &req).is_err());
        req.payload = Payload::Filing(&p);
        Writers.render(OutputFormat::Txt, &req).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("Schedule: IRS990"));
    }
}

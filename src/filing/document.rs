/// Filing documents: locating the XML, splitting it into schedules.
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use roxmltree::{Document, Node};

use super::FilingError;
use crate::types::{FieldValue, ScheduleResult};

/// Schedule name under which the return header is reported.
pub const RETURN_HEADER_SCHEDULE: &str = "ReturnHeader990x";

/// Schedules that can be requested with `--schedule`.
pub const KNOWN_SCHEDULES: &[&str] = &[
    "IRS990",
    "IRS990EZ",
    "IRS990PF",
    "IRS990ScheduleA",
    "IRS990ScheduleB",
    "IRS990ScheduleC",
    "IRS990ScheduleD",
    "IRS990ScheduleE",
    "IRS990ScheduleF",
    "IRS990ScheduleG",
    "IRS990ScheduleH",
    "IRS990ScheduleI",
    "IRS990ScheduleJ",
    "IRS990ScheduleK",
    "IRS990ScheduleL",
    "IRS990ScheduleM",
    "IRS990ScheduleN",
    "IRS990ScheduleO",
    "IRS990ScheduleR",
    RETURN_HEADER_SCHEDULE,
];

/// File name of a filing in the local filing directory.
#[must_use]
pub fn filing_file_name(object_id: &str) -> String {
    format!("{object_id}_public.xml")
}

/// One e-file return. Call [`Filing::process`] before reading schedules.
#[derive(Debug, Clone)]
pub struct Filing {
    object_id: String,
    location: PathBuf,
    schedules: Vec<ScheduleResult>,
}

impl Filing {
    /// A filing read from `filepath` when given, else from `filing_dir`.
    #[must_use]
    pub fn new(object_id: &str, filepath: Option<&Path>, filing_dir: &Path) -> Self {
        let location = filepath.map_or_else(
            || filing_dir.join(filing_file_name(object_id)),
            Path::to_path_buf,
        );
        Self {
            object_id: object_id.to_owned(),
            location,
            schedules: Vec::new(),
        }
    }

    /// Where the XML is read from.
    #[must_use]
    pub fn location(&self) -> &Path {
        &self.location
    }

    /// Read and parse the XML.
    ///
    /// # Errors
    ///
    /// `FilingNotFound` when the file is missing, `MalformedFiling` when it is
    /// not an e-file return, `Io` for any other read failure.
    pub fn process(&mut self) -> Result<(), FilingError> {
        let xml = std::fs::read_to_string(&self.location).map_err(|err| {
            if err.kind() == ErrorKind::NotFound {
                FilingError::FilingNotFound {
                    path: self.location.clone(),
                }
            } else {
                FilingError::Io(err)
            }
        })?;
        self.schedules = parse_return(&self.object_id, &xml)?;
        Ok(())
    }

    /// Names of the schedules present, in document order.
    #[must_use]
    pub fn list_schedules(&self) -> Vec<String> {
        self.schedules
            .iter()
            .map(|s| s.schedule_name.clone())
            .collect()
    }

    /// Consume the filing, yielding its parsed schedules.
    #[must_use]
    pub fn into_schedules(self) -> Vec<ScheduleResult> {
        self.schedules
    }
}

/// Split a return document into schedules with flattened leaf fields.
///
/// # Errors
///
/// Returns `FilingError::MalformedFiling` when the text is not XML or its root
/// element is not `Return`.
pub fn parse_return(object_id: &str, xml: &str) -> Result<Vec<ScheduleResult>, FilingError> {
    let malformed = |reason: String| FilingError::MalformedFiling {
        object_id: object_id.to_owned(),
        reason,
    };

    let doc = Document::parse(xml.trim_start_matches('\u{feff}'))
        .map_err(|e| malformed(e.to_string()))?;
    let root = doc.root_element();
    let root_name = root.tag_name().name();
    if root_name != "Return" {
        return Err(malformed(format!("root element is <{root_name}>, expected <Return>")));
    }

    let mut schedules = Vec::new();
    for child in root.children().filter(Node::is_element) {
        match child.tag_name().name() {
            "ReturnHeader" => {
                schedules.push(schedule(RETURN_HEADER_SCHEDULE, child, "/Return"));
            }
            "ReturnData" => {
                for sked in child.children().filter(Node::is_element) {
                    schedules.push(schedule(
                        sked.tag_name().name(),
                        sked,
                        "/Return/ReturnData",
                    ));
                }
            }
            _ => {}
        }
    }
    Ok(schedules)
}

fn schedule(name: &str, node: Node<'_, '_>, parent_path: &str) -> ScheduleResult {
    let mut fields = Vec::new();
    collect_fields(node, parent_path, &mut fields);
    ScheduleResult {
        schedule_name: name.to_owned(),
        fields,
    }
}

fn collect_fields(node: Node<'_, '_>, parent_path: &str, out: &mut Vec<FieldValue>) {
    let path = format!("{parent_path}/{}", node.tag_name().name());
    let mut has_element_children = false;
    for child in node.children().filter(Node::is_element) {
        has_element_children = true;
        collect_fields(child, &path, out);
    }
    if has_element_children {
        return;
    }
    if let Some(text) = node.text().map(str::trim).filter(|t| !t.is_empty()) {
        out.push(FieldValue {
            xpath: path,
            value: text.to_owned(),
        });
    }
}

/// Minimal two-schedule return used by tests across the crate.
#[cfg(test)]
pub(crate) const SAMPLE_RETURN: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<Return xmlns="http://www.irs.gov/efile" returnVersion="2015v2.1">
  <ReturnHeader binaryAttachmentCnt="0">
    <TaxYr>2015</TaxYr>
    <Filer>
      <EIN>942872637</EIN>
      <BusinessName><BusinessNameLine1Txt>EXAMPLE FOUNDATION</BusinessNameLine1Txt></BusinessName>
    </Filer>
  </ReturnHeader>
  <ReturnData documentCnt="2">
    <IRS990 documentId="RetDoc1">
      <TotalRevenueAmt>125000</TotalRevenueAmt>
      <EmptyInd/>
    </IRS990>
    <IRS990ScheduleA documentId="RetDoc2">
      <PublicSupportCY170Pct>0.45</PublicSupportCY170Pct>
    </IRS990ScheduleA>
  </ReturnData>
</Return>"#;

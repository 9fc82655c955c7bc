use super::header::{
    HeaderRecord, ECHO_TIME, PATIENT_ID, SERIES_DESCRIPTION, SERIES_INSTANCE_UID, SERIES_NUMBER,
    SERIES_TIME, STUDY_INSTANCE_UID,
};
use crate::error::NotDicomError;
use dicom::dictionary_std::tags;
use dicom::object::{DefaultDicomObject, OpenFileOptions};
use std::path::Path;

/// Reads the header of one file, failing for anything that is not DICOM.
pub trait HeaderReader {
    fn read_header(&self, path: &Path) -> Result<HeaderRecord, NotDicomError>;
}

/// Header reader backed by the `dicom` crate. Stops before pixel data.
#[derive(Debug, Clone, Copy, Default)]
pub struct DicomHeaderReader;

impl HeaderReader for DicomHeaderReader {
    fn read_header(&self, path: &Path) -> Result<HeaderRecord, NotDicomError> {
        log::trace!("Reading DICOM header: {}", path.display());
        let object = OpenFileOptions::new()
            .read_until(tags::PIXEL_DATA)
            .open_file(path)
            .map_err(|err| NotDicomError {
                path: path.to_path_buf(),
                reason: err.to_string(),
            })?;

        let mut record = HeaderRecord::new();
        if let Some(number) = attribute_int(&object, SERIES_NUMBER) {
            record = record.with(SERIES_NUMBER, number);
        }
        if let Some(echo) = attribute_float(&object, ECHO_TIME) {
            record = record.with(ECHO_TIME, echo);
        }
        // A blank description is still a name; only an absent one is missing.
        if let Some(description) = attribute_raw_text(&object, SERIES_DESCRIPTION) {
            record = record.with(SERIES_DESCRIPTION, description);
        }
        for name in [
            SERIES_TIME,
            SERIES_INSTANCE_UID,
            STUDY_INSTANCE_UID,
            PATIENT_ID,
        ] {
            if let Some(text) = attribute_text(&object, name) {
                record = record.with(name, text);
            }
        }

        Ok(record)
    }
}

fn attribute_text(object: &DefaultDicomObject, name: &str) -> Option<String> {
    attribute_raw_text(object, name).filter(|value| !value.is_empty())
}

fn attribute_raw_text(object: &DefaultDicomObject, name: &str) -> Option<String> {
    object
        .element_by_name(name)
        .ok()
        .and_then(|element| element.to_str().ok())
        .map(|value| value.trim().to_string())
}

fn attribute_int(object: &DefaultDicomObject, name: &str) -> Option<i64> {
    object
        .element_by_name(name)
        .ok()
        .and_then(|element| element.to_int::<i64>().ok())
}

fn attribute_float(object: &DefaultDicomObject, name: &str) -> Option<f64> {
    object
        .element_by_name(name)
        .ok()
        .and_then(|element| element.to_float64().ok())
}

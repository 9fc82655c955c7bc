//! Synthetic DICOM files for tests.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};

use dicom::core::{DataElement, PrimitiveValue, VR};
use dicom::dictionary_std::{tags, uids};
use dicom::object::{FileMetaTableBuilder, InMemDicomObject};

static INSTANCE: AtomicU32 = AtomicU32::new(1);

pub fn write_series_file(
    dir: &Path,
    file_name: &str,
    number: i64,
    description: &str,
    echo_time: Option<f64>,
) -> PathBuf {
    write_file(dir, file_name, Some(number), description, Some("101500.000000"), echo_time)
}

/// Like [`write_series_file`], with SeriesNumber and SeriesTime optional.
pub fn write_file(
    dir: &Path,
    file_name: &str,
    number: Option<i64>,
    description: &str,
    series_time: Option<&str>,
    echo_time: Option<f64>,
) -> PathBuf {
    let instance_uid = format!(
        "1.2.826.0.1.3680043.2.1125.{}",
        INSTANCE.fetch_add(1, Ordering::Relaxed)
    );

    let mut object = InMemDicomObject::new_empty();
    object.put(DataElement::new(
        tags::SOP_CLASS_UID,
        VR::UI,
        PrimitiveValue::from(uids::MR_IMAGE_STORAGE),
    ));
    object.put(DataElement::new(
        tags::SOP_INSTANCE_UID,
        VR::UI,
        PrimitiveValue::from(instance_uid.as_str()),
    ));
    if let Some(number) = number {
        object.put(DataElement::new(
            tags::SERIES_NUMBER,
            VR::IS,
            PrimitiveValue::from(number.to_string()),
        ));
    }
    object.put(DataElement::new(
        tags::SERIES_DESCRIPTION,
        VR::LO,
        PrimitiveValue::from(description),
    ));
    if let Some(time) = series_time {
        object.put(DataElement::new(tags::SERIES_TIME, VR::TM, PrimitiveValue::from(time)));
    }
    if let Some(echo) = echo_time {
        object.put(DataElement::new(
            tags::ECHO_TIME,
            VR::DS,
            PrimitiveValue::from(echo.to_string()),
        ));
    }

    let file = object
        .with_meta(
            FileMetaTableBuilder::new()
                .transfer_syntax(uids::EXPLICIT_VR_LITTLE_ENDIAN)
                .media_storage_sop_class_uid(uids::MR_IMAGE_STORAGE)
                .media_storage_sop_instance_uid(instance_uid.as_str()),
        )
        .expect("valid file meta");

    let path = dir.join(file_name);
    file.write_to_file(&path).expect("write DICOM fixture");
    path
}

/// Six series like a short head session: four single-echo scouts and a
/// multi-echo pair (single-band reference and the run itself).
pub fn write_session(dir: &Path) {
    let scouts = [
        (1, "AAHEAD_SCOUT_TMS", 4),
        (2, "AAHEAD_SCOUT_TMS_MPR_sag", 3),
        (3, "AAHEAD_SCOUT_TMS_MPR_cor", 2),
        (4, "AAHEAD_SCOUT_TMS_MPR_tra", 2),
    ];
    for (number, description, count) in scouts {
        for i in 0..count {
            write_series_file(dir, &format!("s{number:02}_{i:03}.dcm"), number, description, Some(1.37));
        }
    }

    let multi_echo = [(5, "MBME_RPE1_TMS_SBRef"), (6, "MBME_RPE1_TMS")];
    for (number, description) in multi_echo {
        for (i, echo) in [11.2, 32.36, 11.2, 32.36].into_iter().enumerate() {
            write_series_file(dir, &format!("s{number:02}_{i:03}.dcm"), number, description, Some(echo));
        }
    }
}

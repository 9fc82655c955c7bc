use crate::model::Series;

const NAME_WIDTH: usize = 35;
const TIME_WIDTH: usize = 15;

/// Placeholder dcm2niix replaces with the echo number.
pub const ECHO_PLACEHOLDER: &str = "_echo-%e";

/// One table row: number, display name, series time, file count, echo tag.
pub fn format_row(series: &Series) -> String {
    format!(
        "{:>3}\t{:<name$}\t{:<time$}\t{:>5}\t{}",
        series.number,
        series.display_name(),
        series.time,
        series.files.len(),
        series.echo_tag(),
        name = NAME_WIDTH,
        time = TIME_WIDTH,
    )
}

/// File name stem for a converted series.
///
/// Path separators and whitespace become `_`; multi-echo series get the
/// echo placeholder appended.
pub fn output_name(series: &Series) -> String {
    let mut name = sanitize(series.display_name());
    if name.is_empty() {
        name = format!("series_{}", series.number);
    }
    if series.is_multi_echo() {
        name.push_str(ECHO_PLACEHOLDER);
    }
    name
}

/// Replaces path separators and whitespace with `_`. Names made only of dots
/// become underscores so they cannot point at `.` or `..`.
pub fn sanitize(name: &str) -> String {
    if !name.is_empty() && name.chars().all(|c| c == '.') {
        return "_".repeat(name.len());
    }
    name.chars()
        .map(|c| {
            if c == '/' || c == '\\' || c.is_whitespace() {
                '_'
            } else {
                c
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn series(name: &str, echoes: &[f64]) -> Series {
        let mut series = Series::new(12, name, vec![PathBuf::from("a"), PathBuf::from("b")]);
        series.time = "093012.500000".into();
        series.echo_times = echoes.to_vec();
        series
    }

    #[test]
    fn row_layout() {
        let row = format_row(&series("T1w_MPRAGE", &[2.3]));
        assert_eq!(
            row,
            format!(" 12\t{:<35}\t{:<15}\t    2\tSE", "T1w_MPRAGE", "093012.500000")
        );
    }

    #[test]
    fn dot_names_stay_inside_destination() {
        assert_eq!(sanitize(".."), "__");
        assert_eq!(sanitize("."), "_");
        assert_eq!(sanitize("../anat"), ".._anat");
        assert_eq!(sanitize("v1.2"), "v1.2");
    }

    #[test]
    fn output_names() {
        assert_eq!(output_name(&series("T1w MPRAGE", &[2.3])), "T1w_MPRAGE");
        assert_eq!(output_name(&series("fmap/phase", &[])), "fmap_phase");
        assert_eq!(output_name(&series("MBME", &[11.2, 32.36])), "MBME_echo-%e");
        assert_eq!(output_name(&series("", &[])), "series_12");

        let mut aliased = series("MBME", &[11.2, 32.36]);
        aliased.alias = Some("rest".into());
        assert_eq!(output_name(&aliased), "rest_echo-%e");
    }
}

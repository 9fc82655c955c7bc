use super::groups::{Groups, IGNORED, UNGROUPED};
use super::header::{HeaderRecord, ECHO_TIME, SERIES_DESCRIPTION, SERIES_NUMBER, SERIES_TIME};
use super::loader::HeaderReader;
use super::series::{Series, SeriesNumber};
use crate::error::TableError;
use crate::grouping::group_by_attribute;
use crate::utils::format_row;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// One snapshot of how a directory's series are named and grouped.
///
/// Snapshots are never edited in place. Every edit returns a new table whose
/// `prevtable` is the table it was derived from; `nexttable` is only set on
/// tables produced by [`SeriesTable::undo`].
#[derive(Debug, Clone)]
pub struct SeriesTable {
    path: PathBuf,
    series: Vec<Series>,
    groups: Groups,
    prevtable: Option<Rc<SeriesTable>>,
    nexttable: Option<Rc<SeriesTable>>,
}

impl SeriesTable {
    /// Reads every file in `path` and partitions the readable ones by
    /// series number, in ascending number order.
    pub fn build(path: &Path, reader: &impl HeaderReader) -> Result<Self, TableError> {
        if !path.is_dir() {
            return Err(TableError::NotADirectory(path.to_path_buf()));
        }
        let path = fs::canonicalize(path).map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Reading DICOM headers in {}", path.display());

        let records = read_records(&path, reader)?;
        let (files, numbers) = group_by_attribute(&records, SERIES_NUMBER, None, true)?;

        let mut series = Vec::with_capacity(files.len());
        for (files, number) in files.into_iter().zip(numbers) {
            let Some(number) = number.as_int() else {
                return Err(TableError::InvalidSeriesNumber(number.to_string()));
            };

            let (_, names) = group_by_attribute(&records, SERIES_DESCRIPTION, Some(files.as_slice()), true)?;
            if names.len() != 1 {
                return Err(TableError::NonUniqueName {
                    number,
                    names: names.iter().map(ToString::to_string).collect(),
                });
            }

            let with_echo: Vec<PathBuf> = files
                .iter()
                .filter(|file| records[*file].get(ECHO_TIME).is_some())
                .cloned()
                .collect();
            let echo_times = if with_echo.is_empty() {
                Vec::new()
            } else {
                let (_, echoes) = group_by_attribute(&records, ECHO_TIME, Some(with_echo.as_slice()), true)?;
                echoes.iter().filter_map(|echo| echo.as_float()).collect()
            };

            let time = records[&files[0]].text(SERIES_TIME).unwrap_or_default();
            let mut entry = Series::new(number, names[0].to_string(), files);
            entry.time = time;
            entry.echo_times = echo_times;
            series.push(entry);
        }

        log::info!("Found {} series in {}", series.len(), path.display());
        Ok(Self::from_series(path, series))
    }

    /// Table over already-collected series. Series numbers must be unique.
    pub fn from_series(path: impl Into<PathBuf>, series: Vec<Series>) -> Self {
        let groups = Groups::ungrouped(series.len());
        Self {
            path: path.into(),
            series,
            groups,
            prevtable: None,
            nexttable: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn numbers(&self) -> Vec<SeriesNumber> {
        self.series.iter().map(|series| series.number).collect()
    }

    pub fn names(&self) -> Vec<&str> {
        self.series.iter().map(|series| series.name.as_str()).collect()
    }

    pub fn files(&self) -> Vec<&[PathBuf]> {
        self.series.iter().map(|series| series.files.as_slice()).collect()
    }

    pub fn echoes(&self) -> Vec<&[f64]> {
        self.series
            .iter()
            .map(|series| series.echo_times.as_slice())
            .collect()
    }

    pub fn groups(&self) -> &Groups {
        &self.groups
    }

    pub fn prevtable(&self) -> Option<&SeriesTable> {
        self.prevtable.as_deref()
    }

    pub fn nexttable(&self) -> Option<&SeriesTable> {
        self.nexttable.as_deref()
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn number2idx(&self, number: SeriesNumber) -> Result<usize, TableError> {
        self.series
            .iter()
            .position(|series| series.number == number)
            .ok_or(TableError::SeriesNotFound(number))
    }

    /// Hides the given series from display and conversion.
    pub fn ignore(&self, numbers: &[SeriesNumber]) -> Result<SeriesTable, TableError> {
        let indices = self.resolve(numbers)?;
        let mut next = self.successor();
        for index in indices {
            next.series[index].alias = Some(String::new());
        }
        log::debug!("Ignored series {numbers:?}");
        Ok(next)
    }

    /// Applies `"<number> <alias> <number> <alias> ..."`.
    pub fn alias(&self, instructions: &str) -> Result<SeriesTable, TableError> {
        let words: Vec<&str> = instructions.split_whitespace().collect();
        if words.len() % 2 != 0 {
            return Err(TableError::UnpairedAlias);
        }
        let pairs = words
            .chunks(2)
            .map(|pair| {
                pair[0]
                    .parse::<SeriesNumber>()
                    .map(|number| (number, pair[1].to_string()))
                    .map_err(|_| TableError::InvalidSeriesNumber(pair[0].to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.alias_series(&pairs)
    }

    pub fn alias_series(&self, pairs: &[(SeriesNumber, String)]) -> Result<SeriesTable, TableError> {
        let numbers: Vec<SeriesNumber> = pairs.iter().map(|(number, _)| *number).collect();
        let indices = self.resolve(&numbers)?;
        let mut next = self.successor();
        for (index, (number, alias)) in indices.into_iter().zip(pairs) {
            log::debug!("Aliased series {number} as {alias:?}");
            next.series[index].alias = Some(alias.clone());
        }
        Ok(next)
    }

    /// Moves the given series into group `name`, creating it if needed.
    pub fn group(&self, numbers: &[SeriesNumber], name: &str) -> Result<SeriesTable, TableError> {
        if name.is_empty() {
            return Err(TableError::EmptyGroupName);
        }
        let indices = self.resolve(numbers)?;
        let mut next = self.successor();
        next.groups.assign(&indices, name);
        log::debug!("Grouped series {numbers:?} into {name:?}");
        Ok(next)
    }

    pub fn ungroup(&self, numbers: &[SeriesNumber]) -> Result<SeriesTable, TableError> {
        self.group(numbers, UNGROUPED)
    }

    /// The previous snapshot, remembering this one for [`SeriesTable::redo`].
    pub fn undo(&self) -> Option<SeriesTable> {
        let prev = self.prevtable.as_ref()?;
        let mut restored = SeriesTable::clone(prev);
        restored.nexttable = Some(Rc::new(self.clone()));
        Some(restored)
    }

    pub fn redo(&self) -> Option<SeriesTable> {
        self.nexttable.as_deref().cloned()
    }

    /// Groups and their displayable series, skipping ignored ones.
    pub fn sections(&self) -> Vec<(&str, Vec<&Series>)> {
        self.groups
            .iter()
            .filter(|(name, _)| *name != IGNORED)
            .map(|(name, members)| {
                let visible = members
                    .iter()
                    .map(|&index| &self.series[index])
                    .filter(|series| !series.is_ignored())
                    .collect();
                (name, visible)
            })
            .collect()
    }

    fn resolve(&self, numbers: &[SeriesNumber]) -> Result<Vec<usize>, TableError> {
        numbers.iter().map(|&number| self.number2idx(number)).collect()
    }

    fn successor(&self) -> SeriesTable {
        let mut next = self.clone();
        next.prevtable = Some(Rc::new(self.clone()));
        next.nexttable = None;
        next
    }
}

impl fmt::Display for SeriesTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dicom files at {}", self.path.display())?;
        for (name, members) in self.sections() {
            write!(f, "\n{name}:")?;
            for series in members {
                write!(f, "\n{}", format_row(series))?;
            }
        }
        Ok(())
    }
}

fn read_records(
    path: &Path,
    reader: &impl HeaderReader,
) -> Result<BTreeMap<PathBuf, HeaderRecord>, TableError> {
    let io_error = |source| TableError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut records = BTreeMap::new();
    let mut skipped = 0usize;
    for entry in fs::read_dir(path).map_err(io_error)? {
        let file = entry.map_err(io_error)?.path();
        if file.is_dir() {
            continue;
        }
        match reader.read_header(&file) {
            Ok(record) if record.get(SERIES_NUMBER).is_some() => {
                records.insert(file, record);
            }
            Ok(_) => {
                log::debug!("Skipping {}: no series number", file.display());
                skipped += 1;
            }
            Err(err) => {
                log::debug!("Skipping {err}");
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        log::info!("Skipped {skipped} non-DICOM entries");
    }
    Ok(records)
}

//! Persistence adapters: dictionary text, seed CSV and the binary
//! artifact. All I/O is whole-file and synchronous; the core never sees a
//! file handle, only validated values and opaque byte buffers.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::SieveError;
use crate::header::{FilterHeader, HEADER_SIZE};

/// Count the members in a dictionary file, one per line. A blank trailing
/// line is not a member. A missing file counts as zero members rather
/// than an error.
pub fn count_members(path: &Path) -> Result<u64, SieveError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(text.lines().filter(|l| !l.is_empty()).count() as u64),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(0),
        Err(e) => Err(e.into()),
    }
}

/// Read all members from a dictionary file, lowercased the same way
/// queries are normalized. A missing file yields no members.
pub fn read_members(path: &Path) -> Result<Vec<String>, SieveError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(text
            .lines()
            .filter(|l| !l.is_empty())
            .map(|l| l.to_lowercase())
            .collect()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e.into()),
    }
}

/// Write the persisted artifact: 12-byte header followed by the packed bit
/// array, as one buffer.
pub fn write_filter(path: &Path, header: &FilterHeader, bits: &[u8]) -> Result<(), SieveError> {
    let mut out = Vec::with_capacity(HEADER_SIZE + bits.len());
    out.extend_from_slice(&header.encode());
    out.extend_from_slice(bits);
    fs::write(path, out)?;
    Ok(())
}

/// Read an artifact back as a unit. The header's fields are authoritative;
/// the payload merely has to be long enough for the declared bit count.
pub fn read_filter(path: &Path) -> Result<(FilterHeader, Vec<u8>), SieveError> {
    let data = fs::read(path)?;
    let header = FilterHeader::decode(&data)?;
    let payload = data[HEADER_SIZE..].to_vec();
    if payload.len() < header.payload_len() {
        return Err(SieveError::Corrupt(format!(
            "artifact declares {} bits but carries only {} payload bytes",
            header.bit_count,
            payload.len()
        )));
    }
    Ok((header, payload))
}

/// Read the seed file: a single CSV line of decimal integers, one per hash
/// function.
pub fn read_seeds(path: &Path) -> Result<Vec<i32>, SieveError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    let mut seeds = Vec::new();
    for record in reader.records() {
        for field in record?.iter() {
            let seed = field.trim().parse::<i32>().map_err(|_| {
                SieveError::Seeds(format!("not a decimal integer seed: {field:?}"))
            })?;
            seeds.push(seed);
        }
    }
    if seeds.is_empty() {
        return Err(SieveError::Seeds("seed file contains no seeds".into()));
    }
    Ok(seeds)
}

/// Write the seed file as a single CSV line.
pub fn write_seeds(path: &Path, seeds: &[i32]) -> Result<(), SieveError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    writer.write_record(seeds.iter().map(|s| s.to_string()))?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_dictionary_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-file.txt");
        assert_eq!(count_members(&path).unwrap(), 0);
        assert!(read_members(&path).unwrap().is_empty());
    }

    #[test]
    fn members_are_lowercased_and_trailing_blank_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dict.txt");
        fs::write(&path, "Aardvark\nABDUCTION\nabsconce\n").unwrap();
        assert_eq!(count_members(&path).unwrap(), 3);
        assert_eq!(
            read_members(&path).unwrap(),
            vec!["aardvark", "abduction", "absconce"]
        );
    }

    #[test]
    fn seed_csv_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seeds.csv");
        let seeds = vec![1, 2, 3, 4, 5, 6, 7];
        write_seeds(&path, &seeds).unwrap();
        assert_eq!(read_seeds(&path).unwrap(), seeds);
    }

    #[test]
    fn seed_csv_without_trailing_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seeds.csv");
        fs::write(&path, "5, 7,11").unwrap();
        assert_eq!(read_seeds(&path).unwrap(), vec![5, 7, 11]);
    }

    #[test]
    fn malformed_seed_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seeds.csv");
        fs::write(&path, "1,two,3").unwrap();
        assert!(matches!(read_seeds(&path), Err(SieveError::Seeds(_))));
    }

    #[test]
    fn truncated_artifact_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dict.bf");
        let header = FilterHeader::new(1, 7, 64);
        write_filter(&path, &header, &[0u8; 4]).unwrap();
        assert!(matches!(read_filter(&path), Err(SieveError::Corrupt(_))));
    }

    #[test]
    fn artifact_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dict.bf");
        let header = FilterHeader::new(1, 7, 24);
        write_filter(&path, &header, &[0xAA, 0xBB, 0xCC]).unwrap();
        let (read_header, payload) = read_filter(&path).unwrap();
        assert_eq!(read_header, header);
        assert_eq!(payload, vec![0xAA, 0xBB, 0xCC]);
    }
}

//! Filesystem layout of the read-only sequence store.
//!
//! Reference and annotation files are organized as
//! `<genome_data_dir>/<species>/<file_type>/<filename>` (e.g.
//! `genomes/giant_panda/reference/asm92444v1.fa`), and BLAST target
//! databases live flat under the configured database directory, keyed by
//! name. This module only resolves and lists paths; serving the bytes is
//! the caller's concern.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::errors::GenomeError;

/// Reject path segments that could escape the data root.
///
/// Segments come straight from request paths, so anything that is not a
/// single normal component (`..`, absolute paths, empty strings) is refused.
fn checked_segment(segment: &str) -> Result<&str, GenomeError> {
    if segment.is_empty() {
        return Err(GenomeError::InvalidSegment(segment.to_string()));
    }
    let path = Path::new(segment);
    let mut components = path.components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(segment),
        _ => Err(GenomeError::InvalidSegment(segment.to_string())),
    }
}

/// Resolve a genome data file, verifying it exists.
pub fn resolve_genome_file(
    genome_data_dir: &Path,
    species: &str,
    file_type: &str,
    filename: &str,
) -> Result<PathBuf, GenomeError> {
    let path = genome_data_dir
        .join(checked_segment(species)?)
        .join(checked_segment(file_type)?)
        .join(checked_segment(filename)?);
    if !path.is_file() {
        return Err(GenomeError::NotFound(path.display().to_string()));
    }
    Ok(path)
}

/// List the species with data under the genome root (one directory each).
pub fn list_species(genome_data_dir: &Path) -> Result<Vec<String>, GenomeError> {
    list_dir_names(genome_data_dir, |entry| entry.is_dir())
}

/// List the target databases available for searching.
///
/// A formatted BLAST database is a family of files sharing a stem
/// (`giant_panda.nhr`, `giant_panda.nin`, ...); each distinct stem is one
/// searchable database name.
pub fn list_databases(blast_db_dir: &Path) -> Result<Vec<String>, GenomeError> {
    let mut names = list_dir_names(blast_db_dir, |entry| entry.is_file())?
        .into_iter()
        .map(|name| match name.split_once('.') {
            Some((stem, _)) => stem.to_string(),
            None => name,
        })
        .collect::<Vec<_>>();
    names.sort();
    names.dedup();
    Ok(names)
}

fn list_dir_names(
    dir: &Path,
    keep: impl Fn(&Path) -> bool,
) -> Result<Vec<String>, GenomeError> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !keep(&entry.path()) {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            names.push(name.to_string());
        }
    }
    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn resolves_existing_file() {
        let root = tempdir().unwrap();
        let dir = root.path().join("giant_panda").join("reference");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("asm92444v1.fa"), ">chr1\nACGT\n").unwrap();

        let path =
            resolve_genome_file(root.path(), "giant_panda", "reference", "asm92444v1.fa").unwrap();
        assert!(path.ends_with("giant_panda/reference/asm92444v1.fa"));
    }

    #[test]
    fn missing_file_is_not_found() {
        let root = tempdir().unwrap();
        let err =
            resolve_genome_file(root.path(), "giant_panda", "reference", "nope.fa").unwrap_err();
        assert!(matches!(err, GenomeError::NotFound(_)));
    }

    #[test]
    fn rejects_traversal_segments() {
        let root = tempdir().unwrap();
        for bad in ["..", "../etc", "a/b", "", "/etc"] {
            let err = resolve_genome_file(root.path(), "giant_panda", bad, "x.fa").unwrap_err();
            assert!(matches!(err, GenomeError::InvalidSegment(_)), "segment {bad:?}");
        }
    }

    #[test]
    fn lists_species_and_databases() {
        let root = tempdir().unwrap();
        let genomes = root.path().join("genomes");
        fs::create_dir_all(genomes.join("giant_panda")).unwrap();
        fs::create_dir_all(genomes.join("snow_leopard")).unwrap();
        fs::write(genomes.join("notes.txt"), "ignored").unwrap();

        let dbs = root.path().join("blast_db");
        fs::create_dir_all(&dbs).unwrap();
        for name in ["giant_panda.nhr", "giant_panda.nin", "snow_leopard.nhr"] {
            fs::write(dbs.join(name), "").unwrap();
        }

        assert_eq!(list_species(&genomes).unwrap(), vec!["giant_panda", "snow_leopard"]);
        assert_eq!(list_databases(&dbs).unwrap(), vec!["giant_panda", "snow_leopard"]);
    }

    #[test]
    fn empty_roots_list_nothing() {
        let root = tempdir().unwrap();
        assert!(list_species(&root.path().join("missing")).unwrap().is_empty());
        assert!(list_databases(&root.path().join("missing")).unwrap().is_empty());
    }
}

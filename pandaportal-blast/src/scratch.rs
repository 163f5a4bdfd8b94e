//! Per-job scratch files for the alignment tool.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Input and output artifacts for one search job.
///
/// Filenames derive from the job id, so concurrent jobs sharing the scratch
/// directory never collide. Both files are removed when the guard drops,
/// whichever way the run exits; deletion failures are ignored.
#[derive(Debug)]
pub struct JobScratch {
    query_path: PathBuf,
    output_path: PathBuf,
}

impl JobScratch {
    /// Stage the cleaned query as a single-record FASTA file and reserve an
    /// output path for the tool's report.
    pub fn stage(temp_dir: &Path, job_id: &str, cleaned_query: &str) -> io::Result<Self> {
        fs::create_dir_all(temp_dir)?;
        let query_path = temp_dir.join(format!("query_{job_id}.fa"));
        let output_path = temp_dir.join(format!("blast_{job_id}.xml"));

        let mut file = fs::File::create(&query_path)?;
        writeln!(file, ">query")?;
        writeln!(file, "{cleaned_query}")?;

        Ok(JobScratch {
            query_path,
            output_path,
        })
    }

    pub fn query_path(&self) -> &Path {
        &self.query_path
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }
}

impl Drop for JobScratch {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.query_path);
        let _ = fs::remove_file(&self.output_path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn stages_query_as_fasta() {
        let dir = tempdir().unwrap();
        let scratch = JobScratch::stage(dir.path(), "a1b2c3d4", "ACGTACGT").unwrap();

        assert_eq!(scratch.query_path(), dir.path().join("query_a1b2c3d4.fa"));
        assert_eq!(scratch.output_path(), dir.path().join("blast_a1b2c3d4.xml"));
        let staged = fs::read_to_string(scratch.query_path()).unwrap();
        assert_eq!(staged, ">query\nACGTACGT\n");
    }

    #[test]
    fn drop_removes_both_artifacts() {
        let dir = tempdir().unwrap();
        {
            let scratch = JobScratch::stage(dir.path(), "a1b2c3d4", "ACGT").unwrap();
            // Simulate the tool having written its report.
            fs::write(scratch.output_path(), "<BlastOutput/>").unwrap();
        }
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn drop_tolerates_already_deleted_files() {
        let dir = tempdir().unwrap();
        let scratch = JobScratch::stage(dir.path(), "a1b2c3d4", "ACGT").unwrap();
        fs::remove_file(scratch.query_path()).unwrap();
        drop(scratch); // must not panic
    }
}

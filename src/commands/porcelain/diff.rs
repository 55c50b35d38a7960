use crate::areas::repository::Repository;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::diff::file_diff::{FileChange, FileDiff, diff_file_maps};
use crate::artifacts::diff::line_diff::LineChange;
use colored::Colorize;
use std::path::Path;

const NULL_PATH: &str = "/dev/null";

impl Repository {
    /// Print the changes between two commits, path by path
    pub fn diff(&self, old_revision: &str, new_revision: &str) -> anyhow::Result<Vec<FileDiff>> {
        let old_oid = Revision::try_parse(old_revision)?.resolve(self)?;
        let new_oid = Revision::try_parse(new_revision)?.resolve(self)?;

        let diffs = diff_file_maps(
            &self.commit_files(Some(&old_oid))?,
            &self.commit_files(Some(&new_oid))?,
            |oid| self.database().load_blob(oid),
        )?;
        tracing::debug!(old = %old_oid, new = %new_oid, files = diffs.len(), "diff computed");

        for diff in &diffs {
            self.print_diff(diff)?;
        }

        Ok(diffs)
    }

    fn print_diff(&self, diff: &FileDiff) -> anyhow::Result<()> {
        let a_path = Path::new("a").join(&diff.path);
        let b_path = Path::new("b").join(&diff.path);

        writeln!(
            self.writer(),
            "{}",
            format!("diff --git {} {}", a_path.display(), b_path.display()).bold()
        )?;

        let (old_label, new_label) = match &diff.change {
            FileChange::Added(oid) => {
                writeln!(self.writer(), "{}", "new file".bold())?;
                writeln!(
                    self.writer(),
                    "{}",
                    format!("index 0000000..{}", oid.to_short_oid()).bold()
                )?;
                (NULL_PATH.to_string(), b_path.display().to_string())
            }
            FileChange::Removed(oid) => {
                writeln!(self.writer(), "{}", "deleted file".bold())?;
                writeln!(
                    self.writer(),
                    "{}",
                    format!("index {}..0000000", oid.to_short_oid()).bold()
                )?;
                (a_path.display().to_string(), NULL_PATH.to_string())
            }
            FileChange::Modified { old, new } => {
                writeln!(
                    self.writer(),
                    "{}",
                    format!("index {}..{}", old.to_short_oid(), new.to_short_oid()).bold()
                )?;
                (a_path.display().to_string(), b_path.display().to_string())
            }
        };

        writeln!(self.writer(), "{}", format!("--- {}", old_label).bold())?;
        writeln!(self.writer(), "{}", format!("+++ {}", new_label).bold())?;

        for line in &diff.lines {
            match line {
                LineChange::Removed(text) => {
                    writeln!(self.writer(), "{}", format!("-{}", text).red())?
                }
                LineChange::Added(text) => {
                    writeln!(self.writer(), "{}", format!("+{}", text).green())?
                }
            }
        }

        Ok(())
    }
}

use crate::areas::repository::Repository;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::log::rev_list::RevList;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use colored::Colorize;

impl Repository {
    /// Print the first-parent history of HEAD, newest first
    pub fn log(&self) -> anyhow::Result<()> {
        let head_oid = Revision::Head.resolve(self)?;

        let mut first = true;
        for entry in RevList::new(self.database(), Some(head_oid)) {
            let (commit_oid, commit) = entry?;

            if !first {
                writeln!(self.writer())?;
            }
            first = false;

            self.show_commit(&commit_oid, &commit)?;
        }

        Ok(())
    }

    fn show_commit(&self, commit_oid: &ObjectId, commit: &Commit) -> anyhow::Result<()> {
        writeln!(
            self.writer(),
            "{}",
            format!("commit {}", commit_oid).yellow()
        )?;
        if let [parent, merge_parent] = commit.parents() {
            writeln!(
                self.writer(),
                "Merge: {} {}",
                parent.to_short_oid(),
                merge_parent.to_short_oid()
            )?;
        }
        writeln!(self.writer(), "Date:   {}", commit.readable_timestamp())?;
        writeln!(self.writer())?;
        for message_line in commit.message().lines() {
            writeln!(self.writer(), "    {}", message_line)?;
        }

        Ok(())
    }
}

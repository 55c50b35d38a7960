mod commit_snapshots;

mod add_files;

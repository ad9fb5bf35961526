use std::path::{Path, PathBuf};

pub const TWO_TABLE_PAGE: &str = r"<!DOCTYPE html>
<html>
  <head><title>page</title></head>
  <body>
    <table>
      <tr><th>Name</th><th>Age</th></tr>
      <tr><td>Alice</td><td>30</td></tr>
    </table>
    <p>Some prose between the tables.</p>
    <table>
      <tr><th>City</th></tr>
      <tr><td>NYC</td></tr>
      <tr><td>LA</td></tr>
    </table>
  </body>
</html>
";

pub fn write_fixture(dir: &Path, name: &str, html: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, html).expect("HTML fixture should be written");
    path
}

/// Names of the CSV files in `dir`, sorted.
pub fn csv_files(dir: &Path) -> Vec<String> {
    let mut names = std::fs::read_dir(dir)
        .expect("directory should be listable")
        .filter_map(Result::ok)
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".csv"))
        .collect::<Vec<_>>();
    names.sort();
    names
}

pub fn read(dir: &Path, name: &str) -> String {
    std::fs::read_to_string(dir.join(name)).expect("output should be readable")
}

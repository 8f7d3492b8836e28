use crate::cli::TopfilesArgs;
use crate::error::Result;
use fepflow::core::topology::registry::{TopFiles, topfiles};
use std::fmt::Write;

pub fn run(args: TopfilesArgs) -> Result<()> {
    let files = topfiles()?;
    match args.name {
        Some(name) => println!("{}", files.path(&name)?.display()),
        None => print!("{}", render(files)),
    }
    Ok(())
}

fn render(files: &TopFiles) -> String {
    let mut out = format!("# {} ({} entries)\n", files.root().display(), files.len());
    for (name, path) in files.iter() {
        let _ = writeln!(out, "{:<36} {}", name, path.display());
    }
    out
}

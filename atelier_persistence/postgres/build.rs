use std::{
    collections::BTreeSet,
    io::{BufWriter, Write},
    path::PathBuf,
};

fn main() {
    println!("cargo::rerun-if-changed=migrations");

    let out_path = PathBuf::from(std::env::var("OUT_DIR").unwrap()).join("migrations.rs");
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("migrations");

    // every `<name>.up.sql` / `<name>.down.sql` pair, ordered by name
    let mut names = BTreeSet::new();
    for file in dir.read_dir().unwrap() {
        let file_name = file.unwrap().file_name().into_string().unwrap();
        let name = file_name
            .strip_suffix(".up.sql")
            .or_else(|| file_name.strip_suffix(".down.sql"));
        if let Some(name) = name {
            names.insert(name.to_owned());
        }
    }

    let mut writer = BufWriter::new(std::fs::File::create(&out_path).unwrap());
    write!(&mut writer, "&[").unwrap();
    for name in names {
        let up = std::fs::read_to_string(dir.join(format!("{name}.up.sql"))).unwrap();
        let down = std::fs::read_to_string(dir.join(format!("{name}.down.sql"))).unwrap();
        write!(
            &mut writer,
            "Migration{{name:{name:?},up:{up:?},down:{down:?}}},"
        )
        .unwrap();
    }
    write!(&mut writer, "]").unwrap();
    writer.flush().unwrap();

    println!("cargo::rustc-env=MIGRATIONS={}", out_path.display());
}

use std::fs;
use std::process;

const INPUT_PATH: &str = "input.txt";
const OUTPUT_PATH: &str = "output.py";

fn main() {
  let source = match fs::read_to_string(INPUT_PATH) {
    Ok(source) => source,
    Err(err) => {
      eprintln!("could not read {INPUT_PATH}: {err}");
      process::exit(1);
    }
  };

  match cpp2py::transpile(&source) {
    Ok(python) => {
      if let Err(err) = fs::write(OUTPUT_PATH, python) {
        eprintln!("could not write {OUTPUT_PATH}: {err}");
        process::exit(1);
      }
      println!("wrote {OUTPUT_PATH}");
    }
    Err(err) => {
      eprintln!("{err}");
      process::exit(1);
    }
  }
}

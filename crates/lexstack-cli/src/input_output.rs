use std::{
    fs::File,
    io::{BufWriter, Read, Write},
};

const STDIO: &str = "-";

/// Input files argument group.
#[derive(clap::Args, Debug)]
pub struct InputArgs {
    /// Input files; "-" (or none) reads stdin.
    #[arg(value_name = "FILE")]
    pub files: Vec<String>,
}

/// One named input.
#[derive(Debug)]
pub struct Input {
    /// The display name.
    pub name: String,

    /// The full text.
    pub text: String,
}

impl InputArgs {
    /// Read every input into memory, in argument order.
    pub fn read_all(&self) -> Result<Vec<Input>, Box<dyn std::error::Error>> {
        if self.files.is_empty() {
            return Ok(vec![read_input(STDIO)?]);
        }
        self.files.iter().map(|name| read_input(name)).collect()
    }
}

fn read_input(name: &str) -> Result<Input, Box<dyn std::error::Error>> {
    let mut text = String::new();
    if name == STDIO {
        std::io::stdin().lock().read_to_string(&mut text)?;
    } else {
        File::open(name)?.read_to_string(&mut text)?;
    }
    log::debug!("read {} bytes from {name:?}", text.len());
    Ok(Input {
        name: name.to_string(),
        text,
    })
}

/// Output argument group.
#[derive(clap::Args, Debug)]
pub struct OutputArgs {
    /// Optional output file; "-" may be used to indicate stdout.
    #[clap(long, default_value = None)]
    pub output: Option<String>,
}

impl OutputArgs {
    /// Open a writer for the output.
    pub fn open_writer(&self) -> Result<Box<dyn Write>, Box<dyn std::error::Error>> {
        Ok(match self.output.as_deref() {
            Some(path) if path != STDIO => Box::new(BufWriter::new(File::create(path)?)),
            _ => Box::new(BufWriter::new(std::io::stdout().lock())),
        })
    }
}

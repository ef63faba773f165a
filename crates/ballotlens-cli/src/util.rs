use std::{
    fs::File,
    io::{self, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use ballotlens_story::{config::StoryConfig, record, story::DataStory};

#[derive(Debug)]
pub enum Output {
    Stdout {
        writer: StdoutLock<'static>,
    },
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    /// Writes `value` as pretty JSON followed by a newline, then flushes.
    pub fn save_json<T>(value: &T, output_path: Option<PathBuf>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = Output::from_output_path(output_path)?;
        let path = output.display_path();
        serde_json::to_writer_pretty(&mut output, value)
            .with_context(|| format!("Failed to write report to {path}"))?;
        writeln!(output).with_context(|| format!("Failed to write report to {path}"))?;
        output
            .flush()
            .with_context(|| format!("Failed to flush report to {path}"))
    }

    /// Opens `output_path` for writing, or stdout when no path is given.
    pub fn from_output_path(output_path: Option<PathBuf>) -> anyhow::Result<Self> {
        let Some(path) = output_path else {
            return Ok(Output::Stdout {
                writer: io::stdout().lock(),
            });
        };
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_owned(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    /// Writes `value` as a single line of compact JSON.
    pub fn write_json_line<T>(&mut self, value: &T) -> io::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer(&mut *self, value)?;
        writeln!(&mut *self)
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout { writer } => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout { writer } => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

/// Loads the story configuration, falling back to the built-in story.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<StoryConfig> {
    let Some(path) = path else {
        return Ok(StoryConfig::default());
    };
    eprintln!("Loading story config from {}", path.display());
    let config = StoryConfig::load(path)
        .with_context(|| format!("Invalid story config: {}", path.display()))?;
    Ok(config)
}

/// Loads records and configuration and assembles the story.
pub fn load_story(data_file: &Path, config_path: Option<&Path>) -> anyhow::Result<DataStory> {
    let config = load_config(config_path)?;

    eprintln!("Loading records from {}", data_file.display());
    let records = record::load_records(data_file)
        .with_context(|| format!("Failed to load records: {}", data_file.display()))?;
    eprintln!("Loaded {} records", records.len());

    let story = DataStory::new(&records, config).context("Failed to build story")?;
    if story.data().coerced > 0 {
        eprintln!(
            "Warning: {} missing or non-numeric values were read as 0",
            story.data().coerced
        );
    }
    Ok(story)
}

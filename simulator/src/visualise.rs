//! Visualisation of waiting-time distributions using gnuplot

use lindley::DiscreteDistribution;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::NamedTempFile;

/// Visualiser for generating charts of a waiting-time distribution
pub struct Visualiser<'a> {
    distribution: &'a DiscreteDistribution,
    output_dir: PathBuf,
    templates_dir: PathBuf,
}

impl<'a> Visualiser<'a> {
    /// Create a new visualiser
    ///
    /// # Arguments
    /// * `distribution` - Distribution to chart
    /// * `output_dir` - Directory where visualizations will be written
    /// * `templates_dir` - Directory containing gnuplot template files
    pub fn new(
        distribution: &'a DiscreteDistribution,
        output_dir: impl Into<PathBuf>,
        templates_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            distribution,
            output_dir: output_dir.into(),
            templates_dir: templates_dir.into(),
        }
    }

    /// Generate probability mass chart
    pub fn pmf_chart(&self) -> std::io::Result<()> {
        let output_path = self.output_dir.join("waiting_time_pmf.png");
        let template_path = self.templates_dir.join("waiting_time_pmf.gnuplot");

        let data_path = write_pmf_data(self.distribution, &output_path)?;
        render(&template_path, &output_path, &data_path)?;
        println!("Generated PMF chart: {}", output_path.display());
        Ok(())
    }

    /// Generate cumulative distribution chart
    pub fn cdf_chart(&self) -> std::io::Result<()> {
        let output_path = self.output_dir.join("waiting_time_cdf.png");
        let template_path = self.templates_dir.join("waiting_time_cdf.gnuplot");

        let data_path = write_cdf_data(self.distribution, &output_path)?;
        render(&template_path, &output_path, &data_path)?;
        println!("Generated CDF chart: {}", output_path.display());
        Ok(())
    }

    /// Generate all standard visualizations
    pub fn generate_all(&self) -> std::io::Result<()> {
        self.pmf_chart()?;
        self.cdf_chart()?;
        Ok(())
    }
}

// Internal helper functions

/// Write `value probability` rows next to `output_path`, returning the data file's path.
fn write_pmf_data(
    distribution: &DiscreteDistribution,
    output_path: &Path,
) -> std::io::Result<PathBuf> {
    let (data_path, mut data_file) = create_data_file(output_path)?;
    writeln!(data_file, "# waiting_time probability")?;
    for (value, probability) in distribution.iter() {
        writeln!(data_file, "{} {}", value, probability)?;
    }
    Ok(data_path)
}

/// Write `value cumulative_probability` rows for every point of the support.
fn write_cdf_data(
    distribution: &DiscreteDistribution,
    output_path: &Path,
) -> std::io::Result<PathBuf> {
    let (data_path, mut data_file) = create_data_file(output_path)?;
    writeln!(data_file, "# waiting_time cumulative_probability")?;
    let mut cumulative = 0.0;
    for value in distribution.min()..=distribution.max() {
        cumulative += distribution.pmf(value);
        writeln!(data_file, "{} {}", value, cumulative.min(1.0))?;
    }
    Ok(data_path)
}

fn create_data_file(output_path: &Path) -> std::io::Result<(PathBuf, std::fs::File)> {
    // Ensure parent directory exists
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let data_path = output_path.with_extension("dat");
    let file = std::fs::File::create(&data_path)?;
    Ok((data_path, file))
}

/// Fill in a gnuplot template and run it.
fn render(template_path: &Path, output_path: &Path, data_path: &Path) -> std::io::Result<()> {
    let template = std::fs::read_to_string(template_path)?;
    let script_content = template
        .replace("{{OUTPUT_PATH}}", &output_path.display().to_string())
        .replace("{{DATA_PATH}}", &data_path.display().to_string());

    // Write gnuplot script to a unique temp file
    let mut temp_script = NamedTempFile::new()?;
    temp_script.write_all(script_content.as_bytes())?;
    temp_script.flush()?;

    // Run gnuplot (temp file will be automatically deleted when dropped)
    let output = Command::new("gnuplot").arg(temp_script.path()).output()?;

    if !output.status.success() {
        return Err(std::io::Error::other(format!(
            "gnuplot failed: {}",
            String::from_utf8_lossy(&output.stderr)
        )));
    }

    Ok(())
}

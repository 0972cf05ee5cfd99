use std::path::PathBuf;

use clap::Parser;

use crate::style::SettingsName;

/// Post-process BBOB benchmark data of several algorithms at once.
///
/// Each FOLDER holds one algorithm's experiment data; the folder names label
/// the algorithms in every table and figure, so name them distinctly. The
/// output folder receives comparison TeX tables, ECDF performance profiles
/// and ERT scaling figures for inclusion in a LaTeX report; files from
/// previous runs are overwritten.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Result folders, one per algorithm
    #[arg(value_name = "FOLDER")]
    pub folders: Vec<PathBuf>,

    /// Verbose mode: print operations and data-sufficiency warnings
    #[arg(short, long)]
    pub verbose: bool,

    /// Output directory
    #[arg(short, long, default_value = "ppdatamany", value_name = "DIR")]
    pub output_dir: PathBuf,

    /// Restrict post-processing to the noisy functions
    #[arg(long)]
    pub noisy: bool,

    /// Restrict post-processing to the noise-free functions
    #[arg(long)]
    pub noise_free: bool,

    /// Output the comparison tables only
    #[arg(long)]
    pub tab_only: bool,

    /// Output the ECDF performance profiles only
    #[arg(long)]
    pub per_only: bool,

    /// Output the ERT scaling figures only
    #[arg(long)]
    pub fig_only: bool,

    /// Visual style preset for figures and tables
    #[arg(long, value_enum, default_value_t = SettingsName::Color)]
    pub settings: SettingsName,
}

impl Args {
    pub fn phases(&self) -> Phases {
        Phases::from_flags(self.tab_only, self.per_only, self.fig_only)
    }
}

/// Which render phases run. Each `*-only` flag switches the other two
/// phases off, so giving two or more of them switches everything off.
/// Observable legacy behavior, kept as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Phases {
    pub profiles: bool,
    pub tables: bool,
    pub figures: bool,
}

impl Phases {
    pub fn from_flags(tab_only: bool, per_only: bool, fig_only: bool) -> Self {
        let mut profiles = true;
        let mut tables = true;
        let mut figures = true;
        if tab_only {
            profiles = false;
            figures = false;
        }
        if per_only {
            tables = false;
            figures = false;
        }
        if fig_only {
            profiles = false;
            tables = false;
        }
        Self {
            profiles,
            tables,
            figures,
        }
    }

    pub fn none_selected(self) -> bool {
        !(self.profiles || self.tables || self.figures)
    }
}

use crate::app;
use bevy::window::WindowResolution;
use orrery::scene::SceneError;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(clap::Parser)]
pub(crate) struct Cli {
    #[clap(subcommand)]
    command: CliCommand,
}

impl Cli {
    pub(crate) fn run(self) -> Result<(), SceneError> {
        self.command.run()
    }
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Validate a scene description and print a summary
    Check {
        #[clap(default_value = app::DEFAULT_SCENE)]
        scene: PathBuf,
    },
    /// Start the renderer
    Run {
        #[clap(short, long)]
        resolution: Option<Resolution>,
        #[clap(short, long, default_value = app::DEFAULT_SCENE)]
        scene: PathBuf,
    },
}

#[derive(Debug, Copy, Clone)]
struct Resolution {
    width: f32,
    height: f32,
}

impl FromStr for Resolution {
    type Err = ResolutionInvalidFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s.split_once('x').ok_or(ResolutionInvalidFormat)?;
        let width = w.parse::<f32>().map_err(|_| ResolutionInvalidFormat)?;
        let height = h.parse::<f32>().map_err(|_| ResolutionInvalidFormat)?;
        Ok(Self { width, height })
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Invalid format for resolution; expected <width>x<height>")]
struct ResolutionInvalidFormat;

impl CliCommand {
    fn run(self) -> Result<(), SceneError> {
        match self {
            Self::Check { scene } => {
                let manifest = app::load_scene(&scene)?;
                println!(
                    "{}: {} bodies under root {:?}",
                    scene.display(),
                    manifest.body_count(),
                    manifest.root.name
                );
                Ok(())
            }
            Self::Run { resolution, scene } => {
                app::get_app(app::AppSettings {
                    resolution: resolution
                        .map(|r| WindowResolution::new(r.width, r.height))
                        .unwrap_or_default(),
                    scene,
                })?
                .run();
                Ok(())
            }
        }
    }
}

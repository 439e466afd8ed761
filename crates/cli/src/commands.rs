use clap::{Args, Subcommand};

#[derive(Args, Debug, Clone)]
pub struct ViewArgs {
    #[arg(long, help = "View definition file (JSON)")]
    pub view: String,

    #[arg(
        long,
        help = "If specified, writes the JSON result to this file instead of stdout"
    )]
    pub output: Option<String>,

    #[arg(long, help = "Always join instead of reading values stored on the anchor")]
    pub no_shortcuts: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Slice recovering the MAIN primary key for a change on `anchor`
    KeyPath {
        #[command(flatten)]
        args: ViewArgs,

        #[arg(long, help = "Alias of the source the change arrived on")]
        anchor: String,
    },
    /// Slice reading fields of a source for a change on `anchor`
    Fields {
        #[command(flatten)]
        args: ViewArgs,

        #[arg(long, help = "Alias of the source the change arrived on")]
        anchor: String,

        #[arg(long, help = "Alias of the source to read from, MAIN by default")]
        target: Option<String>,

        #[arg(long = "field", help = "Field to read; repeat for several, omit for all")]
        fields: Vec<String>,
    },
    /// Slice recovering the view's overridden key for a change on `anchor`
    ComputedKey {
        #[command(flatten)]
        args: ViewArgs,

        #[arg(long, help = "Alias of the source the change arrived on")]
        anchor: String,
    },
    /// Key-path slices for every source of the view
    PlanAll {
        #[command(flatten)]
        args: ViewArgs,
    },
}

impl Commands {
    pub fn args(&self) -> &ViewArgs {
        match self {
            Commands::KeyPath { args, .. }
            | Commands::Fields { args, .. }
            | Commands::ComputedKey { args, .. }
            | Commands::PlanAll { args } => args,
        }
    }
}

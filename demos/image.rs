use clap::{Parser, Subcommand};
use image_name::{ImageName, Matcher};

#[derive(Parser, Debug)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the name and the tag of an image reference.
    Split {
        /// Image reference.
        image: String,
    },

    /// Check if the name of an image reference is the target.
    Match {
        /// Image reference.
        image: String,

        /// Expected image name.
        target: String,

        /// Compare the target as plain text instead of a pattern.
        #[arg(short, long)]
        literal: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    match Args::parse().command {
        Command::Split { image } => {
            let image = ImageName::from(image.as_str());
            println!("NAME   {}", image.name);
            println!("TAG    {}", image.tag_value().unwrap_or_default());
            println!("DIGEST {}", image.digest().unwrap_or_default());
        }

        Command::Match {
            image,
            target,
            literal,
        } => {
            let matcher = if literal {
                Matcher::literal(&target)
            } else {
                Matcher::try_new(target)?
            };

            if !matcher.is_match(&image) {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

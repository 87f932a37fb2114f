use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum OptionsError {
    #[error("invalid hex color {0:?} (expected RRGGBB, e.g. 1a1b26)")]
    InvalidColor(String),
    #[error("invalid seed {0:?} (expected an unsigned integer)")]
    InvalidSeed(String),
    #[error("{0} requires a value")]
    MissingValue(&'static str),
    #[error("unknown option {0:?}")]
    UnknownOption(String),
}

#[derive(Debug, Clone)]
pub struct Options {
    pub effect: String,
    pub bg_color: Option<(u8, u8, u8)>,
    pub seed: Option<u64>,
    pub message: Option<String>,
    pub help: bool,
}

impl Options {
    pub fn parse(args: impl Iterator<Item = String>) -> Result<Self, OptionsError> {
        let args: Vec<String> = args.collect();
        let mut opts = Self {
            effect: "fireworks".to_string(),
            bg_color: None,
            seed: None,
            message: None,
            help: false,
        };

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--bg-color" => {
                    let value = args.get(i + 1).ok_or(OptionsError::MissingValue("--bg-color"))?;
                    opts.bg_color = Some(
                        parse_hex_color(value)
                            .ok_or_else(|| OptionsError::InvalidColor(value.clone()))?,
                    );
                    i += 2;
                }
                "--seed" => {
                    let value = args.get(i + 1).ok_or(OptionsError::MissingValue("--seed"))?;
                    opts.seed = Some(
                        value
                            .parse()
                            .map_err(|_| OptionsError::InvalidSeed(value.clone()))?,
                    );
                    i += 2;
                }
                "--message" => {
                    let value = args.get(i + 1).ok_or(OptionsError::MissingValue("--message"))?;
                    opts.message = Some(value.clone());
                    i += 2;
                }
                "help" | "--help" | "-h" => {
                    opts.help = true;
                    i += 1;
                }
                arg => {
                    if arg.starts_with('-') {
                        return Err(OptionsError::UnknownOption(arg.to_string()));
                    }
                    opts.effect = arg.to_string();
                    i += 1;
                }
            }
        }

        Ok(opts)
    }
}

pub fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some((r, g, b))
}

//! Pretty print a JSON file, as a Python-style value.
//!
//! ```text
//! cargo run --example json -- data.json --width 60 --color
//! ```

use clap::Parser;
use pretty_values::{
    render, ColorTheme, Inspect, RenderOptions, SeqKind, Shape, Style, StyleEncoder, Token,
    TypeInfo, BOOL, DICT, FLOAT, INT, LIST, NONE, STR,
};
use std::borrow::Cow;
use std::error::Error;
use std::path::PathBuf;
use termion::{color, style};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Pretty print a JSON file")]
struct Args {
    /// The JSON file to display.
    path: PathBuf,
    /// Maximum line width. Defaults to the width of the terminal.
    #[arg(short, long)]
    width: Option<usize>,
    /// Maximum width of each line, not counting indentation.
    #[arg(short, long)]
    ribbon: Option<usize>,
    /// Elements of each array or object to display.
    #[arg(long)]
    max_seq_len: Option<usize>,
    /// Levels of nesting to display.
    #[arg(long)]
    max_depth: Option<usize>,
    /// Sort object keys.
    #[arg(long)]
    sort_keys: bool,
    /// Color the output with terminal escape codes.
    #[arg(long)]
    color: bool,
}

enum Json {
    Null,
    Bool(bool),
    Int(i128),
    Float(f64),
    String(String),
    Array(Vec<Json>),
    Object(Vec<(String, Json)>),
}

impl From<serde_json::Value> for Json {
    fn from(value: serde_json::Value) -> Json {
        use serde_json::Value;

        match value {
            Value::Null => Json::Null,
            Value::Bool(b) => Json::Bool(b),
            Value::Number(n) => match (n.as_i64(), n.as_u64()) {
                (Some(n), _) => Json::Int(i128::from(n)),
                (None, Some(n)) => Json::Int(i128::from(n)),
                (None, None) => Json::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => Json::String(s),
            Value::Array(elems) => Json::Array(elems.into_iter().map(Json::from).collect()),
            Value::Object(entries) => Json::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Json::from(value)))
                    .collect(),
            ),
        }
    }
}

impl Inspect for Json {
    fn type_info(&self) -> &'static TypeInfo {
        match self {
            Json::Null => &NONE,
            Json::Bool(_) => &BOOL,
            Json::Int(_) => &INT,
            Json::Float(_) => &FLOAT,
            Json::String(_) => &STR,
            Json::Array(_) => &LIST,
            Json::Object(_) => &DICT,
        }
    }

    fn shape(&self) -> Shape<'_> {
        match self {
            Json::Null => Shape::None,
            Json::Bool(b) => Shape::Bool(*b),
            Json::Int(n) => Shape::Int(*n),
            Json::Float(x) => Shape::Float(*x),
            Json::String(s) => Shape::Str(Cow::Borrowed(s.as_str())),
            Json::Array(elems) => Shape::Sequence {
                kind: SeqKind::List,
                items: elems.iter().map(|elem| elem as &dyn Inspect).collect(),
                ordered: true,
            },
            Json::Object(entries) => Shape::Mapping {
                entries: entries
                    .iter()
                    .map(|(key, value)| (key as &dyn Inspect, value as &dyn Inspect))
                    .collect(),
                ordered: true,
            },
        }
    }
}

/// Colors tokens with termion's escape codes.
#[derive(Debug)]
struct TermionEncoder {
    theme: ColorTheme,
}

impl StyleEncoder for TermionEncoder {
    fn encode(&self, token: Token) -> Option<String> {
        let token_style = Style::for_token(token);
        let rgb = self.theme.rgb(token_style.color);
        let mut code = format!(
            "{}{}",
            style::Reset,
            color::Fg(color::Rgb(rgb.red, rgb.green, rgb.blue))
        );
        if token_style.bold {
            code.push_str(&style::Bold.to_string());
        }
        if token_style.underlined {
            code.push_str(&style::Underline.to_string());
        }
        if token_style.reversed {
            code.push_str(&style::Invert.to_string());
        }
        Some(code)
    }

    fn reset(&self) -> String {
        style::Reset.to_string()
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let source = std::fs::read_to_string(&args.path)?;
    let json = Json::from(serde_json::from_str::<serde_json::Value>(&source)?);

    let width = match args.width {
        Some(width) => width,
        None => termion::terminal_size().map_or(79, |(width, _)| usize::from(width)),
    };
    let mut options = RenderOptions::default().with_width(width);
    if let Some(ribbon) = args.ribbon {
        options.ribbon_width = ribbon;
    }
    if args.max_seq_len.is_some() {
        options.max_seq_len = args.max_seq_len;
    }
    options.max_depth = args.max_depth;
    options.sort_keys = args.sort_keys;
    if args.color {
        options = options.with_style_encoder(TermionEncoder {
            theme: ColorTheme::default_dark(),
        });
    }

    println!("{}", render(&json, &options)?);
    Ok(())
}

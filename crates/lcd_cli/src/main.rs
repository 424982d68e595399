mod tictactoe;

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use image::Rgb;
use indicatif::{ProgressBar, ProgressStyle};
use lcd_render::{split_segments, LcdSurface, PanelOptions};

use tictactoe::{Outcome, Player, TicTacToe};

#[derive(Parser, Debug)]
#[command(author, version, about = "Inspect and render simulated segment-LCD panels")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the segments extracted from a glyph sheet
    Inspect(InspectArgs),
    /// Render one panel state to an image file
    Render(RenderArgs),
    /// Render a sequence of panel states to numbered frame files
    Animate(AnimateArgs),
    /// Play tic-tac-toe on a 22-segment panel, one frame per move
    Play(PlayArgs),
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Glyph sheet image path
    sheet: PathBuf,
    /// Write a render with every segment numbered to this path
    #[arg(long)]
    debug_out: Option<PathBuf>,
    #[command(flatten)]
    settings: PanelSettings,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Glyph sheet image path
    sheet: PathBuf,
    /// Output image path
    #[arg(short, long)]
    output: PathBuf,
    /// Active segment indices, e.g. --on 0,3,11
    #[arg(long, value_delimiter = ',')]
    on: Vec<usize>,
    /// Activate every segment
    #[arg(long, default_value_t = false)]
    all: bool,
    #[command(flatten)]
    settings: PanelSettings,
}

#[derive(Parser, Debug)]
struct AnimateArgs {
    /// Glyph sheet image path
    sheet: PathBuf,
    /// State file: one line of 0/1 flags per frame, one flag per segment
    states: PathBuf,
    /// Output directory for frame files
    #[arg(short, long)]
    out_dir: PathBuf,
    #[command(flatten)]
    settings: PanelSettings,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Glyph sheet image path (must extract to exactly 22 segments)
    sheet: PathBuf,
    /// Frame image rewritten after every move
    #[arg(short, long, default_value = "frame.png")]
    output: PathBuf,
    #[command(flatten)]
    settings: PanelSettings,
}

#[derive(Parser, Debug, Clone)]
struct PanelSettings {
    /// Foreground color as #rrggbb
    #[arg(long, default_value = "#111d29")]
    fg: String,
    /// Shadow color as #rrggbb
    #[arg(long, default_value = "#5a605a")]
    shadow: String,
    /// Disable the drop-shadow layer
    #[arg(long, default_value_t = false)]
    no_shadow: bool,
    /// Background color as #rrggbb
    #[arg(long, default_value = "#7d8176")]
    bg: String,
    /// Fill the background with the transparency key instead of a color
    #[arg(long, default_value_t = false)]
    transparent: bool,
    /// Overlay segment index labels on the render
    #[arg(long, default_value_t = false)]
    debug: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Inspect(args) => inspect(args),
        Commands::Render(args) => render(args),
        Commands::Animate(args) => animate(args),
        Commands::Play(args) => play(args),
    }
}

fn inspect(args: InspectArgs) -> Result<()> {
    let sheet = image::open(&args.sheet)
        .with_context(|| format!("failed to load sheet {:?}", args.sheet))?
        .to_rgb8();

    let segments = split_segments(&sheet);
    println!("{} segments in {:?} ({}x{})", segments.len(), args.sheet, sheet.width(), sheet.height());
    for (index, segment) in segments.iter().enumerate() {
        let (x, y) = segment.position;
        let (width, height) = segment.glyph.dimensions();
        println!("  {index:>3X}  pos=({x},{y})  size={width}x{height}");
    }

    if let Some(debug_out) = &args.debug_out {
        let mut options = args.settings.to_options()?;
        options.show_debug = true;
        let mut surface = LcdSurface::from_sheet(&sheet, options);
        surface.render();
        save_canvas(&surface, debug_out)?;
        println!("numbered render written to {debug_out:?}");
    }

    Ok(())
}

fn render(args: RenderArgs) -> Result<()> {
    let mut surface = load_surface(&args.sheet, &args.settings)?;

    let mut states = vec![args.all; surface.segments().len()];
    for &index in &args.on {
        let slot = states
            .get_mut(index)
            .with_context(|| format!("segment index {index} out of range (panel has {} segments)", surface.segments().len()))?;
        *slot = true;
    }
    surface.set_states(&states)?;
    surface.render();
    save_canvas(&surface, &args.output)?;
    Ok(())
}

fn animate(args: AnimateArgs) -> Result<()> {
    let mut surface = load_surface(&args.sheet, &args.settings)?;

    let states_text = fs::read_to_string(&args.states)
        .with_context(|| format!("failed to read state file {:?}", args.states))?;
    let frames: Vec<Vec<bool>> = states_text
        .lines()
        .filter(|line| !line.trim().is_empty() && !line.trim_start().starts_with('#'))
        .map(parse_state_line)
        .collect::<Result<_>>()?;
    if frames.is_empty() {
        bail!("no frames found in {:?}", args.states);
    }

    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("failed to create output directory {:?}", args.out_dir))?;

    let progress = ProgressBar::new(frames.len() as u64);
    progress.set_style(
        ProgressStyle::with_template(
            "{spinner} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} frames",
        )
        .unwrap()
        .progress_chars("=> "),
    );

    for (index, frame) in frames.iter().enumerate() {
        surface
            .set_states(frame)
            .with_context(|| format!("frame {index} in {:?}", args.states))?;
        surface.render();
        save_canvas(&surface, &args.out_dir.join(format!("frame_{index:04}.png")))?;
        progress.inc(1);
    }

    progress.finish_with_message(format!("Frames written to {:?}", args.out_dir));
    Ok(())
}

fn play(args: PlayArgs) -> Result<()> {
    let mut surface = load_surface(&args.sheet, &args.settings)?;
    if surface.segments().len() != tictactoe::SEGMENT_COUNT {
        bail!(
            "tic-tac-toe needs a {}-segment panel, {:?} extracted to {}",
            tictactoe::SEGMENT_COUNT,
            args.sheet,
            surface.segments().len()
        );
    }

    let mut game = TicTacToe::new();
    write_frame(&mut surface, &game, &args.output)?;
    println!("Frame written to {:?} after every move.", args.output);
    println!("Moves: w/a/s/d to move the cursor, m (or empty line) to mark, q to quit.");

    let stdin = io::stdin();
    loop {
        print_status(&game);
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        match line.trim() {
            "a" | "left" => game.move_cursor(-1, 0),
            "d" | "right" => game.move_cursor(1, 0),
            "w" | "up" => game.move_cursor(0, -1),
            "s" | "down" => game.move_cursor(0, 1),
            "" | "m" | "mark" => game.press(),
            "q" | "quit" => break,
            other => {
                println!("unknown move {other:?}");
                continue;
            },
        }
        write_frame(&mut surface, &game, &args.output)?;
    }

    Ok(())
}

fn print_status(game: &TicTacToe) {
    match game.outcome() {
        None => {
            let mark = match game.player() {
                Player::X => 'X',
                Player::O => 'O',
            };
            let (x, y) = game.cursor();
            println!("{mark} to move, cursor at ({x},{y})");
        },
        Some(Outcome::Won(Player::X)) => println!("X wins, mark to play again"),
        Some(Outcome::Won(Player::O)) => println!("O wins, mark to play again"),
        Some(Outcome::Stalemate) => println!("stalemate, mark to play again"),
    }
}

fn write_frame(surface: &mut LcdSurface, game: &TicTacToe, path: &Path) -> Result<()> {
    surface.set_states(&game.segment_states())?;
    surface.render();
    save_canvas(surface, path)
}

fn load_surface(sheet: &Path, settings: &PanelSettings) -> Result<LcdSurface> {
    let options = settings.to_options()?;
    LcdSurface::from_path(sheet, options)
        .with_context(|| format!("failed to load sheet {sheet:?}"))
}

fn save_canvas(surface: &LcdSurface, path: &Path) -> Result<()> {
    surface.canvas().save(path).with_context(|| format!("failed to write {path:?}"))
}

fn parse_state_line(line: &str) -> Result<Vec<bool>> {
    line.trim()
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .map(|ch| match ch {
            '0' => Ok(false),
            '1' => Ok(true),
            other => bail!("invalid state flag {other:?}, expected 0 or 1"),
        })
        .collect()
}

impl PanelSettings {
    fn to_options(&self) -> Result<PanelOptions> {
        Ok(PanelOptions {
            fg: parse_color(&self.fg)?,
            shadow: if self.no_shadow { None } else { Some(parse_color(&self.shadow)?) },
            background: if self.transparent { None } else { Some(parse_color(&self.bg)?) },
            show_debug: self.debug,
        })
    }
}

fn parse_color(text: &str) -> Result<Rgb<u8>> {
    let hex = text.strip_prefix('#').unwrap_or(text);
    if hex.len() != 6 || !hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
        bail!("invalid color {text:?}, expected #rrggbb");
    }
    let value = u32::from_str_radix(hex, 16).with_context(|| format!("invalid color {text:?}"))?;
    Ok(Rgb([(value >> 16) as u8, (value >> 8) as u8, value as u8]))
}

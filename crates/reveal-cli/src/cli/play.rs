//! `reveal play` - a scripted host.
//!
//! Reads one command per line and feeds it to a [`Reveal`] controller the
//! same way a GUI would, then prints what happened as one JSON object per
//! line. Blank lines and `#` comments are skipped.
//!
//! ```text
//! key ArrowRight          # host key name; `space` means " "
//! swipe 200 100 40 110    # x0 y0 x1 y1, optional `multi` / `zoomed`
//! action uncover          # any action name
//! set count 24            # stage a settings change (count, mode, min-area)
//! ```

use std::fs;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use log::{debug, warn};
use serde::Serialize;

use reveal::{Action, CoveringWorker, GestureState, Outcome, Point, Reveal, RevealState, Settings};

use super::common::{TileArgs, parse_mode};

/// Generation that takes longer than this is reported as an error.
const GENERATION_TIMEOUT: Duration = Duration::from_secs(30);

/// One parsed script line.
#[derive(Debug, Clone, PartialEq)]
enum Step {
    Key(String),
    Swipe(GestureState),
    Action(Action),
    Set(String, String),
}

/// What gets printed after each step.
#[derive(Serialize)]
struct Report<'a> {
    line: usize,
    input: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    outcome: Option<&'a Outcome>,
    state: RevealState,
    visible: usize,
    tiles: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<(usize, usize)>,
}

/// The host side: the controller plus what a window would own.
struct Host {
    game: Reveal,
    worker: CoveringWorker,
    width: f64,
    height: f64,
    seed: Option<u64>,
    /// Coverings generated so far; varies the seed between images.
    generation: u64,
}

impl Host {
    fn regenerate(&mut self) -> Result<()> {
        let seed = self.seed.map(|s| s.wrapping_add(self.generation));
        self.generation += 1;
        self.worker
            .request(self.game.covering_request(self.width, self.height).with_seed(seed));
        let result = self
            .worker
            .wait(GENERATION_TIMEOUT)
            .ok_or_else(|| anyhow!("Covering generation timed out"))?;
        // A failed covering leaves the old tiles in place.
        if let Err(e) = self.game.apply(result) {
            warn!("keeping previous covering: {e}");
        }
        Ok(())
    }

    fn run(&mut self, step: &Step) -> Result<Option<Outcome>> {
        let outcome = match step {
            Step::Key(key) => self.game.handle_key(key),
            Step::Swipe(gesture) => self.game.handle_gesture(gesture),
            Step::Action(action) => Some(self.game.dispatch(*action)),
            Step::Set(field, value) => {
                let mut staged = self
                    .game
                    .staged()
                    .cloned()
                    .unwrap_or_else(|| self.game.settings().clone());
                stage_field(&mut staged, field, value)?;
                self.game.stage_settings(staged);
                None
            }
        };

        match &outcome {
            Some(Outcome::ShowImage { .. }) | Some(Outcome::SettingsChanged { regenerate: true }) => {
                self.regenerate()?
            }
            _ => {}
        }
        Ok(outcome)
    }

    fn report<'a>(&self, line: usize, input: &'a str, outcome: Option<&'a Outcome>) -> Report<'a> {
        let session = self.game.session();
        let images = self.game.images();
        Report {
            line,
            input,
            outcome,
            state: session.state(),
            visible: session.visible_count(),
            tiles: session.len(),
            image: (!images.is_empty()).then(|| images.progress()),
        }
    }
}

pub fn cmd_play(
    settings: Settings,
    width: f64,
    height: f64,
    tiles: &TileArgs,
    images: usize,
    script: Option<&Path>,
) -> Result<()> {
    let settings = tiles.apply(&settings)?;
    let mut host = Host {
        game: Reveal::new(settings),
        worker: CoveringWorker::new(),
        width,
        height,
        seed: tiles.seed,
        generation: 0,
    };

    let reader: Box<dyn BufRead> = match script {
        Some(path) => Box::new(BufReader::new(
            fs::File::open(path).with_context(|| format!("Failed to open script {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let start = host.game.set_images(images);
    host.regenerate()?;
    if host.game.session().is_empty() {
        bail!("Could not cover a {width}x{height} image with the requested tiles");
    }
    writeln!(out, "{}", serde_json::to_string(&host.report(0, "start", Some(&start)))?)?;

    for (i, line) in reader.lines().enumerate() {
        let line = line.context("Failed to read script")?;
        let number = i + 1;
        let Some(step) = parse_step(&line).with_context(|| format!("line {number}: {line}"))? else {
            continue;
        };
        debug!("line {number}: {step:?}");

        let outcome = host.run(&step).with_context(|| format!("line {number}: {line}"))?;
        let report = host.report(number, line.trim(), outcome.as_ref());
        writeln!(out, "{}", serde_json::to_string(&report)?)?;
    }
    Ok(())
}

fn parse_step(line: &str) -> Result<Option<Step>> {
    let line = line.split('#').next().unwrap_or_default().trim();
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let rest: Vec<&str> = words.collect();

    let step = match verb {
        "key" => {
            let key = match rest.as_slice() {
                ["space"] => " ".to_string(),
                [key] => key.to_string(),
                _ => bail!("expected: key <name>"),
            };
            Step::Key(key)
        }
        "swipe" => Step::Swipe(parse_swipe(&rest)?),
        "action" => match rest.as_slice() {
            [name] => Step::Action(Action::from_name(name).ok_or_else(|| anyhow!("unknown action '{name}'"))?),
            _ => bail!("expected: action <name>"),
        },
        "set" => match rest.as_slice() {
            [field, value] => Step::Set(field.to_string(), value.to_string()),
            _ => bail!("expected: set <field> <value>"),
        },
        other => bail!("unknown command '{other}'"),
    };
    Ok(Some(step))
}

fn parse_swipe(words: &[&str]) -> Result<GestureState> {
    if words.len() < 4 {
        bail!("expected: swipe x0 y0 x1 y1 [multi] [zoomed]");
    }
    let mut coords = [0.0; 4];
    for (slot, word) in coords.iter_mut().zip(words) {
        *slot = word
            .parse::<f64>()
            .with_context(|| format!("'{word}' is not a number"))?;
    }

    let mut gesture = GestureState {
        start: Point::new(coords[0], coords[1]),
        end: Point::new(coords[2], coords[3]),
        multi_touch_seen: false,
        zoomed: false,
    };
    for flag in &words[4..] {
        match *flag {
            "multi" => gesture.multi_touch_seen = true,
            "zoomed" => gesture.zoomed = true,
            other => bail!("unknown swipe flag '{other}'"),
        }
    }
    Ok(gesture)
}

fn stage_field(settings: &mut Settings, field: &str, value: &str) -> Result<()> {
    match field {
        "count" => settings.covering_object_count = value.parse().context("count must be a number")?,
        "mode" => settings.covering_type = parse_mode(value)?,
        "min-area" => settings.min_tile_area = value.parse().context("min-area must be a number")?,
        "buttons" => settings.show_control_buttons = value.parse().context("buttons must be true/false")?,
        other => bail!("unknown setting '{other}'"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reveal::{CoveringType, Redraw};

    fn host(n: usize) -> Host {
        let mut host = Host {
            game: Reveal::new(Settings { covering_object_count: n, ..Settings::default() }),
            worker: CoveringWorker::new(),
            width: 200.0,
            height: 100.0,
            seed: Some(1),
            generation: 0,
        };
        host.game.set_images(2);
        host.regenerate().unwrap();
        host
    }

    #[test]
    fn parses_each_command() {
        assert_eq!(parse_step("key space").unwrap(), Some(Step::Key(" ".into())));
        assert_eq!(parse_step("  # just a comment").unwrap(), None);
        assert_eq!(parse_step("").unwrap(), None);
        assert_eq!(
            parse_step("action commit-settings").unwrap(),
            Some(Step::Action(Action::CommitSettings))
        );
        assert_eq!(
            parse_step("set mode shards # comment").unwrap(),
            Some(Step::Set("mode".into(), "shards".into()))
        );

        let Some(Step::Swipe(g)) = parse_step("swipe 0 0 100 5 zoomed").unwrap() else {
            panic!("expected a swipe");
        };
        assert!(g.zoomed && !g.multi_touch_seen);
        assert_eq!(g.end, Point::new(100.0, 5.0));
    }

    #[test]
    fn rejects_bad_lines() {
        assert!(parse_step("jump").is_err());
        assert!(parse_step("swipe 1 2 3").is_err());
        assert!(parse_step("swipe 1 2 3 x").is_err());
        assert!(parse_step("action fly").is_err());
        assert!(parse_step("key").is_err());
    }

    #[test]
    fn uncover_then_next_image_regenerates() {
        let mut h = host(4);
        assert_eq!(
            h.run(&Step::Action(Action::Uncover)).unwrap(),
            Some(Outcome::Redraw(Redraw::Tiles(vec![0])))
        );
        assert_eq!(h.game.session().visible_count(), 3);

        let next = h.run(&Step::Key("ArrowRight".into())).unwrap();
        assert_eq!(next, Some(Outcome::ShowImage { index: 1, total: 2 }));
        assert_eq!(h.game.session().visible_count(), 4);
    }

    #[test]
    fn staged_settings_apply_on_commit() {
        let mut h = host(4);
        assert_eq!(h.run(&Step::Set("count".into(), "6".into())).unwrap(), None);
        assert_eq!(h.run(&Step::Set("mode".into(), "triangles".into())).unwrap(), None);
        assert_eq!(h.game.session().len(), 4);

        let outcome = h.run(&Step::Action(Action::CommitSettings)).unwrap();
        assert_eq!(outcome, Some(Outcome::SettingsChanged { regenerate: true }));
        assert_eq!(h.game.settings().covering_type, CoveringType::Triangles);
        assert_eq!(h.game.session().len(), 6);
    }

    #[test]
    fn impossible_settings_keep_old_tiles() {
        let mut h = host(4);
        h.run(&Step::Set("count".into(), "5000".into())).unwrap();
        h.run(&Step::Action(Action::CommitSettings)).unwrap();
        assert_eq!(h.game.session().len(), 4);
    }
}

use std::path::PathBuf;

use clap::Parser;

use crate::constants::MAX_SLOTS;

/// Keyboard instrument with a recorder bank, in the terminal.
#[derive(Debug, Parser)]
#[command(name = "tonebox", version, about)]
pub struct Args {
    /// Number of recording slots (keys 1-9, then 0)
    #[arg(long, default_value_t = MAX_SLOTS, value_parser = parse_slots)]
    pub slots: usize,

    /// Directory of .wav files preloaded onto the clip keys (Z..M)
    #[arg(long, value_name = "DIR")]
    pub clips: Option<PathBuf>,

    /// Where Ctrl+S writes recordings
    #[arg(long, value_name = "DIR", default_value = "tonebox_session")]
    pub export_dir: PathBuf,

    /// Log destination. The terminal belongs to the UI, so logs go here.
    #[arg(long, value_name = "FILE", default_value = "tonebox.log")]
    pub log_file: PathBuf,
}

fn parse_slots(s: &str) -> Result<usize, String> {
    let n: usize = s.parse().map_err(|_| format!("`{s}` is not a number"))?;
    if (1..=MAX_SLOTS).contains(&n) {
        Ok(n)
    } else {
        Err(format!("slot count must be between 1 and {MAX_SLOTS}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["tonebox"]).unwrap();
        assert_eq!(args.slots, MAX_SLOTS);
        assert_eq!(args.clips, None);
        assert_eq!(args.export_dir, PathBuf::from("tonebox_session"));
        assert_eq!(args.log_file, PathBuf::from("tonebox.log"));
    }

    #[test]
    fn slot_count_is_bounded() {
        assert_eq!(
            Args::try_parse_from(["tonebox", "--slots", "9"]).unwrap().slots,
            9
        );
        assert!(Args::try_parse_from(["tonebox", "--slots", "0"]).is_err());
        assert!(Args::try_parse_from(["tonebox", "--slots", "11"]).is_err());
        assert!(Args::try_parse_from(["tonebox", "--slots", "many"]).is_err());
    }
}

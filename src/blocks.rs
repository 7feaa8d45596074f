// blocks.rs — spacing and merge rules for text headed into the host's prompt box.

fn gap(blank_lines_between: usize) -> String { "\n".repeat(blank_lines_between + 1) }

/// Drops blank lines, trims the rest, and joins them with `blank_lines_between`
/// empty lines in between. Callers keep the count in 1..=3.
pub fn format_as_prompt_blocks(text: &str, blank_lines_between: usize) -> String {
    let lines: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    if lines.is_empty() { return String::new(); }
    lines.join(&gap(blank_lines_between))
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ApplyMode {
    #[default]
    Append,
    Replace,
}

impl ApplyMode {
    pub const ALL: [ApplyMode; 2] = [ApplyMode::Append, ApplyMode::Replace];

    pub fn label(self) -> &'static str {
        match self { ApplyMode::Append => "Append", ApplyMode::Replace => "Replace" }
    }

    pub fn from_label(label: &str) -> Self {
        match label.trim() { "Replace" => ApplyMode::Replace, _ => ApplyMode::Append }
    }
}

/// Merges generated text into `existing`. An empty contribution leaves
/// `existing` untouched.
pub fn apply_to_prompts_box(existing: &str, new_text: &str, mode: ApplyMode, blank_lines_between: usize) -> String {
    let formatted = format_as_prompt_blocks(new_text, blank_lines_between);
    if formatted.is_empty() { return existing.to_string(); }
    match mode {
        ApplyMode::Replace => formatted,
        ApplyMode::Append if existing.trim().is_empty() => formatted,
        ApplyMode::Append => format!("{}{}{}", existing.trim_end(), gap(blank_lines_between), formatted),
    }
}

// ── Preview source ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PreviewSource {
    #[default]
    Builder,
    Preset,
    Batch,
}

impl PreviewSource {
    pub const ALL: [PreviewSource; 3] = [PreviewSource::Builder, PreviewSource::Preset, PreviewSource::Batch];

    pub fn label(self) -> &'static str {
        match self {
            PreviewSource::Builder => "Builder",
            PreviewSource::Preset  => "Preset",
            PreviewSource::Batch   => "Batch",
        }
    }

    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Preset" => PreviewSource::Preset,
            "Batch"  => PreviewSource::Batch,
            _        => PreviewSource::Builder,
        }
    }
}

pub fn pick_source<'a>(source: PreviewSource, builder: &'a str, preset: &'a str, batch: &'a str) -> &'a str {
    match source {
        PreviewSource::Builder => builder,
        PreviewSource::Preset  => preset,
        PreviewSource::Batch   => batch,
    }
}

/// What the preview box shows: the chosen output, block-formatted.
pub fn preview_text(source: PreviewSource, builder: &str, preset: &str, batch: &str, blank_lines_between: usize) -> String {
    format_as_prompt_blocks(pick_source(source, builder, preset, batch), blank_lines_between)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn blocks_use_one_blank_line() {
        assert_eq!(format_as_prompt_blocks("a\nb\nc", 1), "a\n\nb\n\nc");
    }

    #[test]
    fn blocks_trim_and_skip_empty_lines() {
        assert_eq!(format_as_prompt_blocks("\n  a  \n\n   \n\tb\r\n", 2), "a\n\n\nb");
        assert_eq!(format_as_prompt_blocks("x", 3), "x");
    }

    #[test]
    fn blocks_of_whitespace_are_empty() {
        for n in 1..=3 {
            assert_eq!(format_as_prompt_blocks("   \n  \n", n), "");
        }
        assert_eq!(format_as_prompt_blocks("", 1), "");
    }

    #[test]
    fn empty_contribution_is_noop() {
        for existing in ["", "keep me  \n", "a\n\nb"] {
            for mode in ApplyMode::ALL {
                assert_eq!(apply_to_prompts_box(existing, "", mode, 2), existing);
                assert_eq!(apply_to_prompts_box(existing, " \n\t", mode, 1), existing);
            }
        }
    }

    #[test]
    fn append_to_empty_has_no_leading_gap() {
        assert_eq!(apply_to_prompts_box("", "X", ApplyMode::Append, 1), format_as_prompt_blocks("X", 1));
        assert_eq!(apply_to_prompts_box("  \n ", "X\nY", ApplyMode::Append, 1), "X\n\nY");
    }

    #[test]
    fn append_keeps_existing_and_trims_its_tail() {
        assert_eq!(apply_to_prompts_box("first\n\n\n", "second", ApplyMode::Append, 1), "first\n\nsecond");
        assert_eq!(apply_to_prompts_box("  lead\nmid", "b\nc", ApplyMode::Append, 2), "  lead\nmid\n\n\nb\n\n\nc");
    }

    #[test]
    fn replace_discards_existing() {
        assert_eq!(apply_to_prompts_box("A", "B", ApplyMode::Replace, 1), format_as_prompt_blocks("B", 1));
    }

    #[test]
    fn mode_labels_default_sensibly() {
        assert_eq!(ApplyMode::from_label("Replace"), ApplyMode::Replace);
        assert_eq!(ApplyMode::from_label(""), ApplyMode::Append);
        assert_eq!(PreviewSource::from_label(" Batch"), PreviewSource::Batch);
        assert_eq!(PreviewSource::from_label("nope"), PreviewSource::Builder);
    }

    #[test]
    fn preview_picks_and_formats() {
        assert_eq!(pick_source(PreviewSource::Preset, "b", "p", "x"), "p");
        assert_eq!(preview_text(PreviewSource::Batch, "b", "p", "one\ntwo", 1), "one\n\ntwo");
        assert_eq!(preview_text(PreviewSource::Builder, "  b ", "p", "x", 3), "b");
    }
}

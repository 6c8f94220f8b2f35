//! Hunspell affix rules (`.aff`) and the word forms they generate.
//!
//! Supported: `FLAG` (char, `UTF-8`, `long`, `num`), `AF` flag aliases,
//! `PFX`/`SFX` classes with cross products, `NEEDAFFIX`, `FORBIDDENWORD`
//! and `ONLYINCOMPOUND`. Continuation flags on affixes (two-level
//! suffixes) and compounding are not applied.

use std::collections::HashMap;

use super::BackendError;

pub(super) type Flag = u32;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum FlagMode {
    #[default]
    Char,
    Long,
    Num,
}

/// One element of an affix condition: `.`, a literal, or a `[...]` set.
#[derive(Debug, Clone, PartialEq, Eq)]
enum CondChar {
    Any,
    Is(char),
    OneOf(Vec<char>),
    NoneOf(Vec<char>),
}

impl CondChar {
    fn accepts(&self, c: char) -> bool {
        match self {
            CondChar::Any => true,
            CondChar::Is(x) => *x == c,
            CondChar::OneOf(set) => set.contains(&c),
            CondChar::NoneOf(set) => !set.contains(&c),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Condition(Vec<CondChar>);

impl Condition {
    fn parse(src: &str) -> Result<Self, String> {
        let mut out = Vec::new();
        let mut chars = src.chars();
        while let Some(c) = chars.next() {
            match c {
                '.' => out.push(CondChar::Any),
                '[' => {
                    let mut set = Vec::new();
                    let mut negated = false;
                    let mut closed = false;
                    for c in chars.by_ref() {
                        match c {
                            ']' => {
                                closed = true;
                                break;
                            }
                            '^' if set.is_empty() && !negated => negated = true,
                            c => set.push(c),
                        }
                    }
                    if !closed {
                        return Err(format!("unclosed `[` in condition {src:?}"));
                    }
                    out.push(if negated {
                        CondChar::NoneOf(set)
                    } else {
                        CondChar::OneOf(set)
                    });
                }
                c => out.push(CondChar::Is(c)),
            }
        }
        Ok(Self(out))
    }

    fn matches_start(&self, word: &str) -> bool {
        let mut chars = word.chars();
        self.0
            .iter()
            .all(|cond| chars.next().is_some_and(|c| cond.accepts(c)))
    }

    fn matches_end(&self, word: &str) -> bool {
        let mut chars = word.chars().rev();
        self.0
            .iter()
            .rev()
            .all(|cond| chars.next().is_some_and(|c| cond.accepts(c)))
    }
}

#[derive(Debug, Clone)]
struct AffixEntry {
    strip: String,
    add: String,
    condition: Condition,
}

impl AffixEntry {
    fn apply_suffix(&self, stem: &str) -> Option<String> {
        if !self.condition.matches_end(stem) {
            return None;
        }
        let base = stem.strip_suffix(self.strip.as_str())?;
        (!base.is_empty()).then(|| format!("{base}{}", self.add))
    }

    fn apply_prefix(&self, stem: &str) -> Option<String> {
        if !self.condition.matches_start(stem) {
            return None;
        }
        let base = stem.strip_prefix(self.strip.as_str())?;
        (!base.is_empty()).then(|| format!("{}{base}", self.add))
    }
}

#[derive(Debug, Clone, Default)]
struct AffixClass {
    cross_product: bool,
    entries: Vec<AffixEntry>,
}

#[derive(Debug, Clone, Default)]
pub(super) struct AffixRules {
    mode: FlagMode,
    aliases: Vec<Vec<Flag>>,
    prefixes: HashMap<Flag, AffixClass>,
    suffixes: HashMap<Flag, AffixClass>,
    need_affix: Option<Flag>,
    forbidden: Option<Flag>,
    only_in_compound: Option<Flag>,
}

fn parse_error(line: usize, reason: impl Into<String>) -> BackendError {
    BackendError::Affix {
        line,
        reason: reason.into(),
    }
}

impl AffixRules {
    pub(super) fn parse(content: &str) -> Result<Self, BackendError> {
        let mut rules = Self::default();
        let mut alias_count_seen = false;

        for (idx, line) in content.lines().enumerate() {
            let line_no = idx + 1;
            let fields: Vec<&str> = line.split_whitespace().collect();
            let Some(&keyword) = fields.first() else {
                continue;
            };
            if keyword.starts_with('#') {
                continue;
            }

            match keyword {
                "FLAG" => {
                    rules.mode = match fields.get(1).copied() {
                        Some("long") => FlagMode::Long,
                        Some("num") => FlagMode::Num,
                        Some("UTF-8") | None => FlagMode::Char,
                        Some(other) => return Err(parse_error(line_no, format!("unknown FLAG type {other:?}"))),
                    };
                }
                "AF" => {
                    let Some(&value) = fields.get(1) else {
                        return Err(parse_error(line_no, "AF without value"));
                    };
                    if !alias_count_seen && value.parse::<usize>().is_ok() {
                        alias_count_seen = true;
                    } else {
                        let flags = rules.parse_flag_string(value);
                        rules.aliases.push(flags);
                    }
                }
                "NEEDAFFIX" | "FORBIDDENWORD" | "ONLYINCOMPOUND" => {
                    let flag = fields
                        .get(1)
                        .and_then(|f| rules.parse_flag_string(f).first().copied())
                        .ok_or_else(|| parse_error(line_no, format!("{keyword} without flag")))?;
                    match keyword {
                        "NEEDAFFIX" => rules.need_affix = Some(flag),
                        "FORBIDDENWORD" => rules.forbidden = Some(flag),
                        _ => rules.only_in_compound = Some(flag),
                    }
                }
                "PFX" | "SFX" => rules.parse_affix_line(keyword == "PFX", &fields, line_no)?,
                _ => {}
            }
        }
        Ok(rules)
    }

    fn parse_affix_line(&mut self, prefix: bool, fields: &[&str], line_no: usize) -> Result<(), BackendError> {
        if fields.len() < 4 {
            return Err(parse_error(line_no, "affix line needs at least 4 fields"));
        }
        let flag = self
            .parse_flag_string(fields[1])
            .first()
            .copied()
            .ok_or_else(|| parse_error(line_no, "affix line without flag"))?;
        let classes = if prefix {
            &mut self.prefixes
        } else {
            &mut self.suffixes
        };

        // Header: `SFX D Y 4`.
        if fields.len() == 4 && matches!(fields[2], "Y" | "N") && fields[3].parse::<usize>().is_ok() {
            let class = classes.entry(flag).or_default();
            class.cross_product = fields[2] == "Y";
            return Ok(());
        }

        let zero = |s: &str| if s == "0" { String::new() } else { s.to_string() };
        let strip = zero(fields[2]);
        // continuation flags after `/` are not applied
        let add = zero(fields[3].split('/').next().unwrap_or_default());
        let condition = match fields.get(4) {
            Some(cond) => Condition::parse(cond).map_err(|reason| parse_error(line_no, reason))?,
            None => Condition::default(),
        };
        classes.entry(flag).or_default().entries.push(AffixEntry { strip, add, condition });
        Ok(())
    }

    /// Flags of a `.dic` entry, resolving `AF` aliases.
    pub(super) fn dic_flags(&self, flags: &str) -> Vec<Flag> {
        if !self.aliases.is_empty() {
            if let Ok(index) = flags.parse::<usize>() {
                return index
                    .checked_sub(1)
                    .and_then(|i| self.aliases.get(i))
                    .cloned()
                    .unwrap_or_default();
            }
        }
        self.parse_flag_string(flags)
    }

    fn parse_flag_string(&self, flags: &str) -> Vec<Flag> {
        match self.mode {
            FlagMode::Char => flags.chars().map(Flag::from).collect(),
            FlagMode::Long => {
                let chars: Vec<char> = flags.chars().collect();
                chars
                    .chunks_exact(2)
                    .map(|pair| (Flag::from(pair[0]) << 16) | Flag::from(pair[1]))
                    .collect()
            }
            FlagMode::Num => flags.split(',').filter_map(|n| n.trim().parse().ok()).collect(),
        }
    }

    /// Every surface form of `stem` carrying `flags`.
    pub(super) fn expand(&self, stem: &str, flags: &[Flag]) -> Vec<String> {
        let has = |flag: Option<Flag>| flag.is_some_and(|f| flags.contains(&f));
        if has(self.forbidden) || has(self.only_in_compound) {
            return Vec::new();
        }

        let mut forms = Vec::new();
        if !has(self.need_affix) {
            forms.push(stem.to_string());
        }

        let mut cross = Vec::new();
        for class in flags.iter().filter_map(|f| self.suffixes.get(f)) {
            for entry in &class.entries {
                if let Some(form) = entry.apply_suffix(stem) {
                    if class.cross_product {
                        cross.push(form.clone());
                    }
                    forms.push(form);
                }
            }
        }

        for class in flags.iter().filter_map(|f| self.prefixes.get(f)) {
            for entry in &class.entries {
                if let Some(form) = entry.apply_prefix(stem) {
                    forms.push(form);
                }
                if class.cross_product && entry.condition.matches_start(stem) {
                    forms.extend(cross.iter().filter_map(|suffixed| entry.apply_prefix(suffixed)));
                }
            }
        }
        forms
    }
}

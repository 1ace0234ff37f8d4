//! Resolution of chosen arguments into file patterns and marker keywords.

use crate::args::ResolvedArgs;
use crate::config::{ArgOption, ArgumentKind, BaseInfo, BoltConfig};
use log::debug;

/// File patterns and keywords derived from the resolved arguments.
///
/// Patterns are relative to the template stem. Keywords are uppercased.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureSet {
    pub file_includes: Vec<String>,
    pub file_excludes: Vec<String>,
    pub keyword_includes: Vec<String>,
    pub keyword_excludes: Vec<String>,
}

impl FeatureSet {
    /// Starts from the package's always-included and always-excluded globs.
    pub fn from_base(base: &BaseInfo) -> Self {
        Self {
            file_includes: base.global_includes.clone(),
            file_excludes: base.global_excludes.clone(),
            ..Self::default()
        }
    }

    fn include(&mut self, files: &[String], keyword: Option<&str>) {
        self.file_includes.extend(files.iter().cloned());
        if let Some(keyword) = keyword {
            push_unique(&mut self.keyword_includes, keyword.to_uppercase());
        }
    }

    fn exclude(&mut self, files: &[String], keyword: Option<&str>) {
        self.file_excludes.extend(files.iter().cloned());
        if let Some(keyword) = keyword {
            push_unique(&mut self.keyword_excludes, keyword.to_uppercase());
        }
    }

    pub fn is_excluded(&self, keyword: &str) -> bool {
        self.keyword_excludes.iter().any(|k| k.eq_ignore_ascii_case(keyword))
    }
}

fn push_unique(keywords: &mut Vec<String>, keyword: String) {
    if !keywords.contains(&keyword) {
        keywords.push(keyword);
    }
}

fn find_branch<'a>(options: &'a [ArgOption], value: &str) -> Option<&'a ArgOption> {
    options.iter().find(|opt| opt.value.eq_ignore_ascii_case(value))
}

/// Visits every declared option of every argument and sorts its files and
/// keyword into the include or exclude side.
///
/// Deselected options are always excluded explicitly, so a region guarded by
/// an option nobody chose is stripped even when no file pattern mentions it.
pub fn resolve_features(config: &BoltConfig, args: &ResolvedArgs) -> FeatureSet {
    let mut features = FeatureSet::from_base(&config.base);

    for arg in &config.args {
        let selected = args.get(&arg.name);
        match &arg.kind {
            ArgumentKind::Select { options } | ArgumentKind::Multiselect { options } => {
                for opt in options {
                    if selected.is_some_and(|value| value.selects(&opt.value)) {
                        features.include(&opt.files, Some(&opt.value));
                    } else {
                        features.exclude(&opt.files, Some(&opt.value));
                    }
                }
            }
            ArgumentKind::Boolean { options } => {
                let enabled = selected.is_some_and(|value| value.is_truthy());
                if enabled {
                    features.include(&[], Some(&arg.name));
                } else {
                    features.exclude(&[], Some(&arg.name));
                }
                if let (Some(on), Some(off)) =
                    (find_branch(options, "true"), find_branch(options, "false"))
                {
                    let (chosen, other) = if enabled { (on, off) } else { (off, on) };
                    features.include(&chosen.files, None);
                    features.exclude(&other.files, None);
                }
            }
            ArgumentKind::String | ArgumentKind::Folder => {}
        }
    }

    debug!("Resolved features: {features:?}");
    features
}

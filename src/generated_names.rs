//! The single-character tag vocabulary that the C# compiler embeds in the
//! names of synthesized members.
//!
//! The full vocabulary (see Roslyn's `GeneratedNameKind`) has around twenty
//! entries, several of which collide across compiler versions: the local
//! function tag `g` shares its character with a deprecated initializer-local
//! tag that old binaries may still carry. Because of that, this enum lists
//! only the tags this crate actually decodes; every other tag character is
//! "unrecognized" and its name passes through undemangled.

/// A generated-name tag recognized by this crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GeneratedNameKind {
    /// `b`: a method synthesized for a lambda body, e.g. `<Outer>b__0`.
    LambdaMethod,
    /// `c`: a closure container type, e.g. `<>c__DisplayClass2_0`.
    LambdaDisplayClass,
    /// `d`: an async or iterator state machine type, e.g. `<Outer>d__3`.
    ///
    /// This crate never matches on this tag directly; state machine
    /// containers are detected structurally via their `<owner>` wrapper.
    StateMachineType,
    /// `g`: a lowered local function, e.g. `<Outer>g__Helper|0_0`.
    LocalFunction,
}

impl GeneratedNameKind {
    /// The character value of this tag as it appears in generated names.
    pub fn tag(self) -> char {
        match self {
            GeneratedNameKind::LambdaMethod => 'b',
            GeneratedNameKind::LambdaDisplayClass => 'c',
            GeneratedNameKind::StateMachineType => 'd',
            GeneratedNameKind::LocalFunction => 'g',
        }
    }

    /// Look up the kind for a tag character. Returns `None` for every tag
    /// this crate does not decode, including the deprecated ones that share
    /// character values with current tags.
    pub fn from_tag(c: char) -> Option<Self> {
        match c {
            'b' => Some(GeneratedNameKind::LambdaMethod),
            'c' => Some(GeneratedNameKind::LambdaDisplayClass),
            'd' => Some(GeneratedNameKind::StateMachineType),
            'g' => Some(GeneratedNameKind::LocalFunction),
            _ => None,
        }
    }
}

/// Prefix of a closure container segment in a nested-class chain.
pub(crate) const LAMBDA_DISPLAY_CLASS_PREFIX: &str = "<>c__";

/// Prefix of a lowered local function name, after the `<owner>` wrapper.
pub(crate) const LOCAL_FUNCTION_PREFIX: &str = "g__";

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn prefixes_match_tag_characters() {
        assert_eq!(
            LAMBDA_DISPLAY_CLASS_PREFIX,
            format!("<>{}__", GeneratedNameKind::LambdaDisplayClass.tag())
        );
        assert_eq!(
            LOCAL_FUNCTION_PREFIX,
            format!("{}__", GeneratedNameKind::LocalFunction.tag())
        );
    }

    #[test]
    fn tag_round_trip() {
        for kind in [
            GeneratedNameKind::LambdaMethod,
            GeneratedNameKind::LambdaDisplayClass,
            GeneratedNameKind::StateMachineType,
            GeneratedNameKind::LocalFunction,
        ] {
            assert_eq!(GeneratedNameKind::from_tag(kind.tag()), Some(kind));
        }
    }

    #[test]
    fn unparsed_tags_are_unrecognized() {
        // 'a' is the deprecated iterator-instance tag, '5' a hoisted-local
        // field tag; neither is decoded here.
        assert_eq!(GeneratedNameKind::from_tag('a'), None);
        assert_eq!(GeneratedNameKind::from_tag('5'), None);
        assert_eq!(GeneratedNameKind::from_tag('x'), None);
    }
}

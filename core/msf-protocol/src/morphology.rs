use alloc::string::{String, ToString};
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use bitflags::bitflags;

/// A tag or value string that is not part of a closed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownValue {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownValue {
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

impl fmt::Display for UnknownValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} value '{}'", self.kind, self.value)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for UnknownValue {}

/// Declares a closed vocabulary whose variants render as their UD spelling.
macro_rules! define_values {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        pub enum $name {
            $(
                #[cfg_attr(feature = "serde", serde(rename = $text))]
                $variant,
            )+
        }

        impl $name {
            pub const fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl core::str::FromStr for $name {
            type Err = UnknownValue;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    _ => Err(UnknownValue::new(stringify!($name), s)),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

define_values! {
    /// Universal part-of-speech tags.
    Upos {
        Adj => "ADJ",
        Adp => "ADP",
        Adv => "ADV",
        Aux => "AUX",
        Cconj => "CCONJ",
        Det => "DET",
        Intj => "INTJ",
        Noun => "NOUN",
        Num => "NUM",
        Part => "PART",
        Pron => "PRON",
        Propn => "PROPN",
        Punct => "PUNCT",
        Sconj => "SCONJ",
        Sym => "SYM",
        Verb => "VERB",
        X => "X",
    }
}

define_values! {
    Tense {
        Pres => "Pres",
        Past => "Past",
        Fut => "Fut",
    }
}

define_values! {
    Mood {
        Ind => "Ind",
        Sub => "Sub",
        Imp => "Imp",
        Cnd => "Cnd",
        Int => "Int",
    }
}

define_values! {
    VerbForm {
        Fin => "Fin",
        Inf => "Inf",
        Sup => "Sup",
        Part => "Part",
        Ger => "Ger",
        Conv => "Conv",
    }
}

define_values! {
    Voice {
        Act => "Act",
        Pass => "Pass",
    }
}

define_values! {
    // Declaration order matches alphabetical order, so sets iterate sorted.
    Aspect {
        Perf => "Perf",
        Prosp => "Prosp",
    }
}

define_values! {
    Polarity {
        Pos => "Pos",
        Neg => "Neg",
    }
}

define_values! {
    /// Modal meanings folded into the Mood feature by modal auxiliaries.
    Modality {
        Cnd => "Cnd",
        Des => "Des",
        Nec => "Nec",
        Pot => "Pot",
        Prms => "Prms",
    }
}

bitflags! {
    /// Coarse word classes the rule engine branches on.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct PosClass: u16 {
        const VERBAL = 1;
        const NOMINAL = 1 << 1;
        const ADJECTIVAL = 1 << 2;
        const ADVERBIAL = 1 << 3;
        const INTERJECTION = 1 << 4;
        const DETERMINER = 1 << 5;
        const AUXILIARY = 1 << 6;
        const PARTICLE = 1 << 7;
        const ADPOSITION = 1 << 8;
        const CONJUNCTION = 1 << 9;
        const OTHER = 1 << 10;

        /// Words that end up with their own bundle even when nothing attached to them.
        const CONTENT = Self::VERBAL.bits()
            | Self::NOMINAL.bits()
            | Self::ADJECTIVAL.bits()
            | Self::INTERJECTION.bits();

        /// Unabsorbed children a head hands pass-through features to.
        const PASS_THROUGH = Self::CONTENT.bits()
            | Self::ADVERBIAL.bits()
            | Self::DETERMINER.bits();

        /// Heads that take determiners and comparison markers.
        const MODIFIABLE = Self::NOMINAL.bits()
            | Self::ADJECTIVAL.bits()
            | Self::ADVERBIAL.bits();

        /// Function words that can head a fixed expression and be promoted.
        const FIXED_PROMOTABLE = Self::ADPOSITION.bits() | Self::ADVERBIAL.bits();

        /// Parts of speech a coordinated relation word can carry.
        const RELATIONAL = Self::ADPOSITION.bits() | Self::CONJUNCTION.bits();
    }
}

impl Upos {
    pub const fn class(self) -> PosClass {
        match self {
            Upos::Verb => PosClass::VERBAL,
            Upos::Noun | Upos::Propn | Upos::Pron | Upos::Num => PosClass::NOMINAL,
            Upos::Adj => PosClass::ADJECTIVAL,
            Upos::Adv => PosClass::ADVERBIAL,
            Upos::Intj => PosClass::INTERJECTION,
            Upos::Det => PosClass::DETERMINER,
            Upos::Aux => PosClass::AUXILIARY,
            Upos::Part => PosClass::PARTICLE,
            Upos::Adp => PosClass::ADPOSITION,
            Upos::Cconj | Upos::Sconj => PosClass::CONJUNCTION,
            Upos::Punct | Upos::Sym | Upos::X => PosClass::OTHER,
        }
    }

    pub fn is(self, class: PosClass) -> bool {
        class.contains(self.class())
    }
}

/// Dependency relation labels the engine reacts to.
pub mod deprel {
    pub const ROOT: &str = "root";
    pub const CASE: &str = "case";
    pub const MARK: &str = "mark";
    pub const CC: &str = "cc";
    pub const CONJ: &str = "conj";
    pub const FIXED: &str = "fixed";
    pub const DET: &str = "det";
    pub const AUX: &str = "aux";
    pub const AUX_PASS: &str = "aux:pass";
    pub const COP: &str = "cop";
    pub const ADVMOD: &str = "advmod";
    pub const ADVCL: &str = "advcl";
    pub const PUNCT: &str = "punct";
    pub const PARATAXIS: &str = "parataxis";
    pub const REPARANDUM: &str = "reparandum";

    /// Children dropped before a head is classified.
    pub const IGNORABLE: [&str; 3] = [PUNCT, PARATAXIS, REPARANDUM];

    /// Relations an AUX child needs to count as tense/aspect/mood marking.
    pub const TAM: [&str; 3] = [AUX, AUX_PASS, COP];

    /// Relations whose label alone makes a child relational.
    pub const RELATIONAL: [&str; 3] = [CASE, MARK, CC];

    /// Relations under which a head heads a clause.
    pub const CLAUSAL: [&str; 8] = [
        CONJ,
        "csubj",
        "xcomp",
        "ccomp",
        ADVCL,
        "acl",
        "advcl:relcl",
        "acl:relcl",
    ];

    pub fn is_ignorable(label: &str) -> bool {
        IGNORABLE.contains(&label)
    }

    pub fn is_clausal(label: &str) -> bool {
        CLAUSAL.contains(&label)
    }
}

//! Pointer relation vocabulary and the mirror table.

use std::fmt;

/// Relation carried by a pointer edge.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum PointerKind {
    /// `!`
    Antonym,
    /// `@`, broader term.
    Hypernym,
    /// `~`, narrower term.
    Hyponym,
    /// `@i`
    InstanceHypernym,
    /// `~i`
    InstanceHyponym,
    /// `#m`
    MemberHolonym,
    /// `#s`
    SubstanceHolonym,
    /// `#p`
    PartHolonym,
    /// `%m`
    MemberMeronym,
    /// `%s`
    SubstanceMeronym,
    /// `%p`
    PartMeronym,
    /// `=`
    Attribute,
    /// `+`
    Derivation,
    /// `*`
    Entailment,
    /// `>`
    Cause,
    /// `^`
    AlsoSee,
    /// `$`
    VerbGroup,
    /// `&`
    SimilarTo,
    /// `<`
    Participle,
    /// `\`
    Pertainym,
    /// `;c`
    DomainTopic,
    /// `-c`
    DomainTopicMember,
    /// `;r`
    DomainRegion,
    /// `-r`
    DomainRegionMember,
    /// `;u`
    DomainUsage,
    /// `-u`
    DomainUsageMember,
}

const SYMBOLS: &[(PointerKind, &str)] = &[
    (PointerKind::Antonym, "!"),
    (PointerKind::Hypernym, "@"),
    (PointerKind::Hyponym, "~"),
    (PointerKind::InstanceHypernym, "@i"),
    (PointerKind::InstanceHyponym, "~i"),
    (PointerKind::MemberHolonym, "#m"),
    (PointerKind::SubstanceHolonym, "#s"),
    (PointerKind::PartHolonym, "#p"),
    (PointerKind::MemberMeronym, "%m"),
    (PointerKind::SubstanceMeronym, "%s"),
    (PointerKind::PartMeronym, "%p"),
    (PointerKind::Attribute, "="),
    (PointerKind::Derivation, "+"),
    (PointerKind::Entailment, "*"),
    (PointerKind::Cause, ">"),
    (PointerKind::AlsoSee, "^"),
    (PointerKind::VerbGroup, "$"),
    (PointerKind::SimilarTo, "&"),
    (PointerKind::Participle, "<"),
    (PointerKind::Pertainym, "\\"),
    (PointerKind::DomainTopic, ";c"),
    (PointerKind::DomainTopicMember, "-c"),
    (PointerKind::DomainRegion, ";r"),
    (PointerKind::DomainRegionMember, "-r"),
    (PointerKind::DomainUsage, ";u"),
    (PointerKind::DomainUsageMember, "-u"),
];

impl PointerKind {
    /// Looks up a wire symbol.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        SYMBOLS
            .iter()
            .find(|(_, s)| *s == symbol)
            .map(|(kind, _)| *kind)
    }

    /// Wire symbol.
    pub fn symbol(self) -> &'static str {
        SYMBOLS
            .iter()
            .find(|(kind, _)| *kind == self)
            .map(|(_, s)| *s)
            .unwrap_or("?")
    }

    /// Every kind in table order.
    pub fn all() -> impl Iterator<Item = PointerKind> {
        SYMBOLS.iter().map(|(kind, _)| *kind)
    }

    /// Relation maintained on the opposite endpoint, if any.
    pub fn mirror(self) -> Option<PointerKind> {
        use PointerKind::*;
        match self {
            Hypernym => Some(Hyponym),
            Hyponym => Some(Hypernym),
            InstanceHypernym => Some(InstanceHyponym),
            InstanceHyponym => Some(InstanceHypernym),
            MemberHolonym => Some(MemberMeronym),
            MemberMeronym => Some(MemberHolonym),
            SubstanceHolonym => Some(SubstanceMeronym),
            SubstanceMeronym => Some(SubstanceHolonym),
            PartHolonym => Some(PartMeronym),
            PartMeronym => Some(PartHolonym),
            DomainTopic => Some(DomainTopicMember),
            DomainTopicMember => Some(DomainTopic),
            DomainRegion => Some(DomainRegionMember),
            DomainRegionMember => Some(DomainRegion),
            DomainUsage => Some(DomainUsageMember),
            DomainUsageMember => Some(DomainUsage),
            Antonym | Attribute | Derivation | SimilarTo | VerbGroup => Some(self),
            Entailment | Cause | AlsoSee | Participle | Pertainym => None,
        }
    }

    /// Whether the kind is its own mirror.
    pub fn is_self_mirroring(self) -> bool {
        self.mirror() == Some(self)
    }
}

impl fmt::Display for PointerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self, self.symbol())
    }
}

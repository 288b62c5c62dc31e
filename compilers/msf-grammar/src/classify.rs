use msf_protocol::{deprel, Node, PosClass, Upos};

use crate::context::SentenceContext;
use crate::record::Records;

/// The single function a dependent plays for its head.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// punct, parataxis, reparandum
    Ignored,
    /// Part of the head's multiword lemma
    Fixed,
    /// Auxiliary, copula or particle marking tense, aspect, mood, voice or polarity
    Tam,
    /// Adposition, subordinator or coordinator
    Relational,
    Remaining,
}

/// A head's dependents, split by role. Each list keeps id order.
#[derive(Debug, Clone, Default)]
pub struct Partition<'a> {
    /// Lemmas of the head and its `fixed` dependents, in id order.
    pub fixed_lemma: String,
    pub fixed: Vec<&'a Node>,
    pub tam: Vec<&'a Node>,
    pub relational: Vec<&'a Node>,
    pub remaining: Vec<&'a Node>,
}

pub fn role(ctx: &SentenceContext<'_>, records: &Records, child: &Node) -> Role {
    if child.is_ignorable() {
        Role::Ignored
    } else if child.has_deprel(deprel::FIXED) {
        Role::Fixed
    } else if is_tam_marker(ctx, child) {
        Role::Tam
    } else if is_relation_word(ctx, records, child) {
        Role::Relational
    } else {
        Role::Remaining
    }
}

fn is_tam_marker(ctx: &SentenceContext<'_>, child: &Node) -> bool {
    match child.upos {
        Upos::Part => true,
        Upos::Aux => deprel::TAM.contains(&child.deprel.as_str()),
        // Negation is tagged PART or ADV depending on the treebank
        _ => child.has_deprel(deprel::ADVMOD) && ctx.lexicon.tam.is_negation(&child.lemma),
    }
}

fn is_relation_word(ctx: &SentenceContext<'_>, records: &Records, child: &Node) -> bool {
    if deprel::RELATIONAL.contains(&child.deprel.as_str()) {
        return true;
    }

    // Coordinated relation word, e.g. the second preposition of "före och efter"
    if child.has_deprel(deprel::CONJ)
        && child.is(PosClass::RELATIONAL)
        && ctx.lexicon.relations.knows(records.lookup_lemma(child))
    {
        return true;
    }

    is_fronted_marker(ctx, child)
}

/// A temporal adverb opening an adverbial clause acts as its subordinator.
fn is_fronted_marker(ctx: &SentenceContext<'_>, child: &Node) -> bool {
    if child.upos != Upos::Adv
        || !child.has_deprel(deprel::ADVMOD)
        || !ctx.lexicon.relations.is_fronted_marker(&child.lemma)
    {
        return false;
    }
    match ctx.head_of(child) {
        Some(head) => head.has_deprel(deprel::ADVCL) && ctx.first_child(head.id) == Some(child.id),
        None => false,
    }
}

/// Splits the dependents of `head` by role and assembles its fixed lemma.
pub fn classify<'a>(
    ctx: &SentenceContext<'a>,
    records: &Records,
    head: &'a Node,
    children: &[&'a Node],
) -> Partition<'a> {
    let mut partition = Partition::default();

    for &child in children {
        match role(ctx, records, child) {
            Role::Ignored => {}
            Role::Fixed => partition.fixed.push(child),
            Role::Tam => partition.tam.push(child),
            Role::Relational => partition.relational.push(child),
            Role::Remaining => partition.remaining.push(child),
        }
    }

    let mut parts: Vec<&Node> = partition.fixed.clone();
    parts.push(head);
    parts.sort_by_key(|node| node.id);
    partition.fixed_lemma = parts
        .iter()
        .map(|node| node.lemma.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    partition
}

//! Case, RelType and ConjType from adpositions, subordinators and coordinators.

use msf_lexicon::{Bucket, RelationTables};
use msf_protocol::features::names;
use msf_protocol::{deprel, FeatureBundle, Node, NodeId};
use msf_tree::Link;

use crate::error::AnnotationError;
use crate::record::Records;

const CLAUSAL_ORDER: [Bucket; 3] = [Bucket::Marker, Bucket::Case, Bucket::Conj];
const NOMINAL_ORDER: [Bucket; 3] = [Bucket::Case, Bucket::Marker, Bucket::Conj];

/// Bucket fixed by the dependency label alone.
fn explicit_bucket(node: &Node) -> Option<Bucket> {
    match node.deprel.as_str() {
        deprel::CASE => Some(Bucket::Case),
        deprel::MARK => Some(Bucket::Marker),
        deprel::CC => Some(Bucket::Conj),
        _ => None,
    }
}

#[derive(Default)]
struct Collected {
    case: Vec<String>,
    marker: Vec<String>,
    conj: Vec<String>,
}

impl Collected {
    fn push(&mut self, bucket: Bucket, value: String) {
        match bucket {
            Bucket::Case => self.case.push(value),
            Bucket::Marker => self.marker.push(value),
            Bucket::Conj => self.conj.push(value),
        }
    }

    fn into_bundle(self) -> FeatureBundle {
        let mut bundle = FeatureBundle::new();
        for (name, values) in [
            (names::CASE, self.case),
            (names::REL_TYPE, self.marker),
            (names::CONJ_TYPE, self.conj),
        ] {
            if !values.is_empty() {
                bundle.set(name, values.join(","));
            }
        }
        bundle
    }
}

/// Derives relation features for a head from its relational dependents.
///
/// On a verb every relation word is read as a clause relation (RelType) or a
/// coordinator (ConjType), and an explicit `case` dependent is an error. On any
/// other head each word is sorted into the bucket its label, its preference or
/// the tables give it.
pub fn resolve_relations(
    tables: &RelationTables,
    records: &Records,
    candidates: &[&Node],
    verbal: bool,
    clausal: bool,
) -> Result<FeatureBundle, AnnotationError> {
    let mut collected = Collected::default();

    if verbal {
        let misplaced: Vec<Link> = candidates
            .iter()
            .filter(|node| explicit_bucket(node) == Some(Bucket::Case))
            .map(|node| Link {
                id: node.id,
                head: node.head,
            })
            .collect();
        if !misplaced.is_empty() {
            return Err(AnnotationError::StructuralAnomaly { links: misplaced });
        }

        for node in candidates {
            let lemma = records.lookup_lemma(node);
            if explicit_bucket(node) == Some(Bucket::Conj) {
                collected.push(Bucket::Conj, tables.lookup(&[Bucket::Conj, Bucket::Case], lemma));
            } else {
                collected.push(Bucket::Marker, tables.lookup(&[Bucket::Marker, Bucket::Case], lemma));
            }
        }
        return Ok(collected.into_bundle());
    }

    let order: &[Bucket] = if clausal { &CLAUSAL_ORDER } else { &NOMINAL_ORDER };
    let mut unclassified: Vec<NodeId> = Vec::new();
    for node in candidates {
        let lemma = records.lookup_lemma(node);
        let bucket = explicit_bucket(node)
            .or_else(|| tables.preference(lemma))
            .or_else(|| order.iter().copied().find(|bucket| tables.contains(*bucket, lemma)));
        match bucket {
            Some(bucket) => collected.push(bucket, tables.lookup(&[bucket], lemma)),
            None => unclassified.push(node.id),
        }
    }
    if !unclassified.is_empty() {
        return Err(AnnotationError::UnclassifiableRelation { ids: unclassified });
    }

    Ok(collected.into_bundle())
}

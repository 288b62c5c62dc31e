//! Built-in Swedish tables.

use std::collections::BTreeMap;

use msf_protocol::features::names;
use msf_protocol::{FeatureBundle, Modality, Tense, Voice};

use crate::determiners::{ComparisonMarker, DeterminerEntry, DeterminerTable};
use crate::relations::{Bucket, RelationTables};
use crate::tam::{FiniteEffect, TamRule, TamTable};
use crate::Lexicon;

// Empty value: the lemma itself is the feature value.
const CASE: &[(&str, &str)] = &[
    ("+", "Conj"), ("-", "Lat"), ("/", "Dis"), (":", "The"),
    ("a", "Dis"), ("all", "Inc"), ("alltefter", "Cau"), ("alltifrån", "Add"),
    ("angående", "The"), ("apropå", "The"), ("av", "Agt"),
    ("bak", "Pst"), ("bakom", "Pst"), ("beroende", "Cnd"), ("beträffande", "The"),
    ("bland", "Ces"), ("bortanför", "Psl"), ("bortom", "Psl"), ("bortsedd", "Exc"),
    ("bredvid", "Apu"),
    ("efter", "Tps"), ("emellan", "Int"), ("emot", "Adv"), ("enl", "Quo"),
    ("enligt", "Quo"), ("exkl", "Exc"),
    ("fastän", "Ccs"), ("framemot", "Tpx"), ("framför", "Ant"), ("från", "Abl"),
    ("från_och_med", "Abl"), ("för", "Ben"), ("förbi", "Pst"), ("före", "Tan"),
    ("förrän", "Tan"), ("förutan", "Add"), ("förutom", "Add"),
    ("genom", "Per"), ("gentemot", "Lat"), ("gällande", "The"),
    ("hos", "Loc"), ("härifrån", "Abl"),
    ("i", "Ine"), ("ifråga", "The"), ("ifrån", "Ela"), ("igenom", "Cau"), ("in", "Ill"),
    ("inför", "Ant"), ("inifrån", "Ela"), ("inklusive", "Inc"), ("innanför", "Ine"),
    ("inom", "Ine"), ("inpå", "Apu"), ("intill", "Apu"), ("inåt", "Inx"),
    ("istället", "Sbs"),
    ("jämförd", "Cmp"), ("jämte", "Com"),
    ("kontra", "Adv"), ("kring", "Cir"),
    ("liksom", "Sem"), ("likt", "Sem"), ("längs", "Lng"),
    ("med", "Com"), ("medan", "Cmt"), ("mellan", "Int"), ("mot", "Adv"),
    ("nedanför", "Sub"), ("nedför", "Dsc"), ("nedom", "Sub"), ("när", "Cnd"),
    ("nära", "Prx"),
    ("oavsett", "Ign"), ("oberoende", "Ign"), ("om", "The"), ("omkring", "Cir"),
    ("ovan", "Sup"), ("ovanför", "Sup"), ("ovanpå", "Sup"),
    ("per", "Dis"), ("plus", "Inc"), ("på", "Ade"),
    ("runt", "Cir"), ("runtomkring", "Cir"), ("rörande", "The"),
    ("sedan", "Teg"), ("sen", "Teg"), ("senast", "Lim"), ("som", "Rpl"),
    ("tack", "Cau"), ("till", "Lat"), ("till_och_med", "Lat"), ("tills", "Ttr"),
    ("trots", "Ccs"), ("tvärsigenom", "Crs"), ("tvärsöver", "Crs"), ("tvärtemot", "Dsm"),
    ("undan", "Abl"), ("under", "Sub"), ("uppför", "Asc"), ("uppåt", "Asc"),
    ("ur", "Ela"), ("utan", "Abe"), ("utanför", "Ext"), ("utanpå", "Ade"),
    ("utefter", "Lng"), ("utför", "Dsc"), ("utifrån", "Exe"), ("utmed", "Lng"),
    ("utom", "Ext"), ("utåt", "Ext"), ("utöver", "Add"),
    ("via", "Pro"), ("vid", "Loc"),
    ("à", "Dis"), ("än", "Cmp"), ("å", "Ade"), ("åt", "Ben"), ("över", "Spx"),
    ("på grund av", "Cau"), ("vid sida av", "Apu"), ("med hjälp av", "Ins"),
    ("till följd av", "Cau"), ("i och med", "Cau"), ("i form av", "Sem"),
    ("i ställe för", "Sbs"), ("i motsats till", "Dsm"), ("för sedan", "Tem"),
    ("i förhållande till", "Cmp"), ("till skillnad från", "Dsm"), ("i linje med", "Rpl"),
    ("–", ""), ("fara", ""), ("den", ""), ("de", ""), ("vad", ""),
    ("from", ""), ("over", ""), ("of", ""), ("to", ""), ("for", ""),
    ("De", ""), ("I", ""), ("In", ""), ("Of", ""), ("On", ""),
];

const MARKER: &[(&str, &str)] = &[
    ("all", "Inc"), ("allt", "Inc"), ("alltefter", "Cau"), ("allteftersom", "Cau"),
    ("antingen", "Disj"), ("av", "Gen"),
    ("bakom", "Pst"), ("beroende", "Cnd"), ("bortsedd", "Exc"),
    ("där", "Loc"), ("därför", "Cau"), ("däri", "Ine"), ("därigenom", "Ins"), ("då", "Tps"),
    ("efter", "Pst"), ("eftersom", "Cau"), ("ehuruväl", "Ccs"), ("emedan", "Cau"),
    ("emot", "Adv"),
    ("fast", "Ccs"), ("fastän", "Ccs"), ("från", "Abl"), ("för", "Pur"), ("förrän", "Tan"),
    ("förutom", "Exc"), ("förutsatt", "Cnd"),
    ("genom", "Ins"),
    ("i", "Ine"), ("ifall", "Cnd"), ("ifråga", "The"), ("ifrån", "Abl"), ("innan", "Tan"),
    ("liksom", "Sem"),
    ("med", "Com"), ("medan", "Add"), ("mellan", "Int"), ("mot", "Adv"),
    ("när", "Tem"),
    ("oavsedd", "Ign"), ("oavsett", "Ign"), ("oberoende", "Ign"), ("om", "The"),
    ("på", "Ade"),
    ("samtidig", "Dur"), ("samtidigt", "Dur"), ("sedan", "Tps"), ("snart", "Tps"),
    ("som", "Rpl"), ("så", "Pur"), ("såsom", "Sem"), ("såvida", "Cnd"), ("såvitt", "Cnd"),
    ("till", "Lat"), ("tills", "Ttr"), ("trots", "Ign"),
    ("under", "Cnd"), ("uppå", "Ade"), ("utan", "Abe"), ("utom", "Exc"), ("utöver", "Add"),
    ("var", "Loc"), ("vare", "Disj"), ("varför", "Cau"), ("varigenom", "Cau"),
    ("vart", "Lat"), ("vid", "Apu"),
    ("än", "Cmp"), ("även", "Add"), ("åt", "Ori"), ("över", "The"),
    ("för att", "Cau"), ("som om", "Rpl"), ("allt eftersom", "Cau"), ("till dess", "Ttr"),
    ("så att", "Pur"), ("efter att", "Tps"), ("även om", "Ccs"), ("trotts att", "Ccs"),
    ("att", ""), ("hur", ""), ("huruvida", ""), ("vad", ""), ("inte", ""),
    ("where", ""), ("If", ""),
];

const CONJ: &[(&str, &str)] = &[
    ("&", "Conj"), ("+", "Conj"), ("-", ""), ("/", "Disj"), ("a", ""),
    ("antingen", "Disj"), ("både", "Conj"), ("det_vill_säga", ""), ("el", "Disj"),
    ("eller", "Disj"), ("fast", "Advs"), ("fastän", "Advs"), ("för", "Reas"),
    ("liksom", "Sem"), ("mellan", "Int"), ("men", "Advs"), ("och", "Conj"),
    ("plus", "Conj"), ("respektive", "Conj"), ("samt", "Conj"), ("som", "Conj"),
    ("så", "Cnsq"), ("såväl", "Conj"), ("ty", "Reas"), ("utan", "Advs"),
    ("utom", "Advs"), ("vare", "Disj"), ("varken", "Nnor"),
    ("and", ""), ("And", ""),
];

fn map(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(lemma, value)| (lemma.to_string(), value.to_string()))
        .collect()
}

fn bundle(items: &[(&str, &str)]) -> FeatureBundle {
    items.iter().copied().collect()
}

pub fn relations() -> RelationTables {
    let mut tables = RelationTables {
        case: map(CASE),
        marker: map(MARKER),
        conj: map(CONJ),
        prefer: BTreeMap::new(),
        fronted_markers: ["då", "när"].iter().map(|s| s.to_string()).collect(),
    };
    // Subordinating uses dominate for these even under nominal heads.
    for lemma in ["eftersom", "innan", "medan"] {
        tables.prefer.insert(lemma.to_string(), Bucket::Marker);
    }
    tables.normalize();
    tables
}

pub fn tam() -> TamTable {
    use FiniteEffect::{FutureShift, Inherit};

    TamTable {
        infinitive_marker: "att".to_string(),
        ignored: ["do", "not", "to"].iter().map(|s| s.to_string()).collect(),
        negation: ["inte", "icke", "ej"].iter().map(|s| s.to_string()).collect(),
        rules: vec![
            TamRule::new("bli").unique().voice(Voice::Pass).supine_perfect().finite(Inherit),
            TamRule::new("få")
                .unique()
                .modality(Modality::Prms)
                .supine_perfect()
                .finite(Inherit),
            TamRule::new("vara")
                .unique()
                .supine_perfect()
                .finite(Inherit)
                .subjunctive_prospective(),
            TamRule::new("komma").unique().supine_perfect().finite(FutureShift),
            TamRule::new("måste").modality(Modality::Nec).tense(Tense::Pres),
            TamRule::new("torde").modality(Modality::Nec).tense(Tense::Past),
            TamRule::new("böra").unique().modality(Modality::Nec).finite(Inherit),
            TamRule::new("behöva")
                .unique()
                .modality(Modality::Nec)
                .supine_perfect()
                .finite(Inherit),
            TamRule::new("kunna")
                .unique()
                .modality(Modality::Pot)
                .supine_perfect()
                .finite(Inherit),
            TamRule::new("lär").modality(Modality::Nec).tense(Tense::Pres),
            TamRule::new("vilja")
                .unique()
                .modality(Modality::Des)
                .supine_perfect()
                .finite(Inherit),
            TamRule::new("må").unique().modality(Modality::Pot).finite(Inherit),
            TamRule::new("skola").unique().finite(FutureShift),
            TamRule::new("ha").unique().perfect().finite(Inherit),
            TamRule::new("så").modality(Modality::Cnd),
        ],
    }
}

pub fn determiners() -> DeterminerTable {
    use names::{DEFINITE, DEM, GENDER, NUMBER, PERSON, POSS, PRON_TYPE};

    let mut entries = vec![
        DeterminerEntry::lemma("en", bundle(&[(DEFINITE, "Ind"), (NUMBER, "Sing")]))
            .refine(&["ett"], bundle(&[(GENDER, "Neut")]))
            .otherwise(bundle(&[(GENDER, "Com")])),
        DeterminerEntry::lemma("den", bundle(&[(DEFINITE, "Def"), (NUMBER, "Sing")]))
            .refine(&["den"], bundle(&[(GENDER, "Com")]))
            .refine(&["det"], bundle(&[(GENDER, "Neut")]))
            .fixed("den här", bundle(&[(DEM, "Prox")]))
            .fixed("den där", bundle(&[(DEM, "Dist")])),
        DeterminerEntry::lemma("de", bundle(&[(DEFINITE, "Def"), (NUMBER, "Plur")]))
            .fixed("de här", bundle(&[(DEM, "Prox")]))
            .fixed("de där", bundle(&[(DEM, "Dist")])),
        DeterminerEntry::lemma("denna", bundle(&[(DEFINITE, "Def"), (DEM, "Prox")]))
            .refine(&["dessa"], bundle(&[(NUMBER, "Plur"), (GENDER, "Com")]))
            .refine(&["detta"], bundle(&[(NUMBER, "Sing"), (GENDER, "Neut")]))
            .otherwise(bundle(&[(NUMBER, "Sing"), (GENDER, "Com")])),
        DeterminerEntry::forms(&["ingen", "inget", "inga"], bundle(&[(DEFINITE, "Ind")]))
            .refine(&["ingen"], bundle(&[(GENDER, "Com"), (NUMBER, "Sing")]))
            .refine(&["inget"], bundle(&[(GENDER, "Neut"), (NUMBER, "Sing")]))
            .otherwise(bundle(&[(NUMBER, "Plur")])),
    ];

    // Possessive determiners; the form carries the possessum's gender and number.
    for (lemma, person, neuter, plural) in [
        ("min", "1", "mitt", "mina"),
        ("din", "2", "ditt", "dina"),
        ("sin", "3", "sitt", "sina"),
        ("vår", "1", "vårt", "våra"),
        ("er", "2", "ert", "era"),
    ] {
        entries.push(
            DeterminerEntry::lemma(
                lemma,
                bundle(&[(DEFINITE, "Def"), (POSS, "Yes"), (PERSON, person), (PRON_TYPE, "Prs")]),
            )
            .refine(&[neuter], bundle(&[(GENDER, "Neut"), (NUMBER, "Sing")]))
            .refine(&[plural], bundle(&[(NUMBER, "Plur")]))
            .otherwise(bundle(&[(GENDER, "Com"), (NUMBER, "Sing")])),
        );
    }

    DeterminerTable {
        entries,
        comparison: vec![
            ComparisonMarker {
                form: "mer".to_string(),
                degree: "Cmp".to_string(),
            },
            ComparisonMarker {
                form: "mest".to_string(),
                degree: "Sup".to_string(),
            },
        ],
    }
}

pub fn lexicon() -> Lexicon {
    Lexicon {
        relations: relations(),
        tam: tam(),
        determiners: determiners(),
    }
}

use std::io::{self, Write};

use msf_protocol::features::ABSENT;
use msf_protocol::{FeatureLayer, Node, Sentence};

fn or_absent(value: Option<&str>) -> &str {
    value.unwrap_or(ABSENT)
}

fn node_columns(node: &Node) -> String {
    [
        node.id.to_string().as_str(),
        node.form.as_str(),
        node.lemma.as_str(),
        node.upos.as_str(),
        or_absent(node.xpos.as_deref()),
        node.feats.render().as_str(),
        node.head.to_string().as_str(),
        node.deprel.as_str(),
        or_absent(node.deps.as_deref()),
        or_absent(node.misc.as_deref()),
    ]
    .join("\t")
}

fn write_block<W: Write>(
    out: &mut W,
    sentence: &Sentence,
    layer: Option<&FeatureLayer>,
) -> io::Result<()> {
    for comment in &sentence.comments {
        writeln!(out, "# {}", comment)?;
    }

    let derived_suffix = if layer.is_some() { "\t_" } else { "" };
    let mut raw = sentence.raw_lines.iter().peekable();

    for (position, node) in sentence.nodes.iter().enumerate() {
        while let Some(line) = raw.next_if(|line| line.position <= position) {
            writeln!(out, "{}{}", line.text, derived_suffix)?;
        }
        match layer {
            Some(layer) => writeln!(out, "{}\t{}", node_columns(node), layer.render(node.id))?,
            None => writeln!(out, "{}", node_columns(node))?,
        }
    }
    for line in raw {
        writeln!(out, "{}{}", line.text, derived_suffix)?;
    }

    writeln!(out)
}

/// Writes a sentence with the derived column taken from `layer`.
pub fn write_annotated<W: Write>(
    out: &mut W,
    sentence: &Sentence,
    layer: &FeatureLayer,
) -> io::Result<()> {
    write_block(out, sentence, Some(layer))
}

/// Writes the ten standard columns only.
pub fn write_plain<W: Write>(out: &mut W, sentence: &Sentence) -> io::Result<()> {
    write_block(out, sentence, None)
}

/// Writes a sentence the annotator gave up on, tagged with its failure code.
pub fn write_rejected<W: Write>(out: &mut W, sentence: &Sentence, code: &str) -> io::Result<()> {
    writeln!(out, "# error_type = {}", code)?;
    write_block(out, sentence, None)
}

pub fn annotated_to_string(sentence: &Sentence, layer: &FeatureLayer) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_annotated(&mut buf, sentence, layer);
    String::from_utf8_lossy(&buf).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::parse_str;
    use msf_protocol::{FeatureBundle, NodeId};

    const INPUT: &str = "\
# sent_id = w1
1-2\tVill du\t_\t_\t_\t_\t_\t_\t_\t_
1\tVill\tvilja\tAUX\tVB\tMood=Ind\t3\taux\t_\t_
2\tdu\tdu\tPRON\t_\t_\t3\tnsubj\t_\t_
3\tkomma\tkomma\tVERB\t_\tVerbForm=Inf\t0\troot\t_\tSpaceAfter=No
";

    #[test]
    fn test_annotated_output_keeps_every_column() {
        let sentence = parse_str(INPUT).unwrap().remove(0);
        let mut layer = FeatureLayer::new();
        layer.insert(NodeId(3), FeatureBundle::parse("Mood=Des,Ind|Voice=Act").unwrap());
        layer.insert(NodeId(2), FeatureBundle::new());

        let text = annotated_to_string(&sentence, &layer);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "# sent_id = w1");
        assert_eq!(lines[1], "1-2\tVill du\t_\t_\t_\t_\t_\t_\t_\t_\t_");
        assert_eq!(lines[2], "1\tVill\tvilja\tAUX\tVB\tMood=Ind\t3\taux\t_\t_\t_");
        assert_eq!(lines[3], "2\tdu\tdu\tPRON\t_\t_\t3\tnsubj\t_\t_\t|");
        assert_eq!(
            lines[4],
            "3\tkomma\tkomma\tVERB\t_\tVerbForm=Inf\t0\troot\t_\tSpaceAfter=No\tMood=Des,Ind|Voice=Act"
        );
        assert!(text.ends_with("\n\n"));
    }

    #[test]
    fn test_rejected_output_has_no_derived_column() {
        let sentence = parse_str(INPUT).unwrap().remove(0);
        let mut buf = Vec::new();
        write_rejected(&mut buf, &sentence, "TAM_UNTREATED_1").unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.starts_with("# error_type = TAM_UNTREATED_1\n# sent_id = w1\n"));
        for line in text.lines().filter(|l| !l.is_empty() && !l.starts_with('#')) {
            assert_eq!(line.split('\t').count(), 10, "{}", line);
        }
    }

    #[test]
    fn test_plain_output_reads_back_identically() {
        let sentence = parse_str(INPUT).unwrap().remove(0);
        let mut buf = Vec::new();
        write_plain(&mut buf, &sentence).unwrap();
        let again = parse_str(std::str::from_utf8(&buf).unwrap()).unwrap().remove(0);
        assert_eq!(again, sentence);
    }

    #[test]
    fn test_plain_output_is_byte_identical() {
        let input = "\
# sent_id = w2
# text =  Hej,  då 
1\tHej\thej\tINTJ\t_\tNumber=Sing|NumType=Card\t0\troot\t_\t_
2\tdå\tdå\tADV\t_\t_\t1\tadvmod\t_\t_

";
        let sentence = parse_str(input).unwrap().remove(0);
        let mut buf = Vec::new();
        write_plain(&mut buf, &sentence).unwrap();
        assert_eq!(std::str::from_utf8(&buf).unwrap(), input);
    }
}

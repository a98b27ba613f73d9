use crate::report::km;
use crate::summary::Summary;

#[derive(Clone)]
pub struct Data {
    pub name: String,
    pub summary: Summary,
}

fn escape(s: &str) -> String {
    let mut ret = String::new();
    for c in s.chars() {
        if "\\*_#[]$`<>@".contains(c) {
            ret.push('\\');
        }
        ret.push(c);
    }
    ret
}

pub fn make_typst_document(data: &[Data]) -> String {
    let mut doc = String::from("#set page(paper: \"a4\")\n#set text(size: 11pt)\n\n");

    for item in data {
        doc.push_str(&format!("== {}\n\n", escape(&item.name)));

        doc.push_str("#table(\n");
        doc.push_str("  columns: (1fr, 1fr),\n");
        doc.push_str("  inset: 10pt,\n");
        doc.push_str("  align: horizon,\n");
        doc.push_str("  [*Element Type*], [*Count*],\n");
        for (t, n) in item.summary.counts.iter() {
            doc.push_str(&format!("  [{}], [{}],\n", t, n));
        }
        doc.push_str(")\n\n");

        if !item.summary.lengths.is_empty() {
            doc.push_str("#table(\n");
            doc.push_str("  columns: (1fr, 1fr),\n");
            doc.push_str("  inset: 10pt,\n");
            doc.push_str("  align: horizon,\n");
            doc.push_str("  [*Element Type*], [*Total Length (km)*],\n");
            for (t, l) in item.summary.lengths.iter() {
                doc.push_str(&format!("  [{}], [{}],\n", t, km(*l)));
            }
            doc.push_str(")\n\n");
        }

        doc.push_str("#pagebreak()\n\n");
    }

    doc
}

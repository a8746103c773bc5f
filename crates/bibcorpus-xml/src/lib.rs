//! DBLP-style XML record source.
//!
//! Recognised record elements and their kinds:
//! - `<inproceedings>` -> conference paper
//! - `<article>` -> journal article
//! - `<book>` -> book
//! - `<incollection>` -> book chapter
//!
//! Within a record only `<author>`, `<title>` and `<year>` matter;
//! everything else is skipped. Titles may carry inline markup
//! (`sub`, `sup`, `i`, `tt`, `ref`) whose text is flattened into the
//! title string. Any XML well-formedness error aborts the stream with
//! [`SourceError::Malformed`].

use bibcorpus_core::ingest::{RecordField, RecordSink, RecordSource, SourceError};
use bibcorpus_domain::PublicationKind;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::path::Path;

/// A record source over one XML document held in memory.
pub struct DblpXmlSource {
    xml: String,
}

impl DblpXmlSource {
    pub fn from_str(xml: impl Into<String>) -> Self {
        Self { xml: xml.into() }
    }

    pub fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let xml = std::fs::read_to_string(path)?;
        Ok(Self { xml })
    }
}

fn record_kind(element: &str) -> Option<PublicationKind> {
    match element {
        "inproceedings" => Some(PublicationKind::ConferencePaper),
        "article" => Some(PublicationKind::Journal),
        "book" => Some(PublicationKind::Book),
        "incollection" => Some(PublicationKind::BookChapter),
        _ => None,
    }
}

fn is_title_markup(element: &str) -> bool {
    matches!(element, "sub" | "sup" | "i" | "tt" | "ref")
}

/// The field element currently being accumulated.
enum Field {
    Author,
    Title,
    Year,
}

impl DblpXmlSource {
    fn field_for(element: &str) -> Option<Field> {
        match element {
            "author" => Some(Field::Author),
            "title" => Some(Field::Title),
            "year" => Some(Field::Year),
            _ => None,
        }
    }
}

impl RecordSource for DblpXmlSource {
    fn stream(&mut self, sink: &mut dyn RecordSink) -> Result<(), SourceError> {
        let mut reader = Reader::from_str(&self.xml);
        let mut buf = Vec::new();

        let mut in_record = false;
        let mut field: Option<Field> = None;
        let mut text = String::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                    if let Some(kind) = record_kind(&name) {
                        in_record = true;
                        field = None;
                        sink.begin_record(kind);
                    } else if in_record && field.is_none() {
                        if let Some(f) = Self::field_for(&name) {
                            field = Some(f);
                            text.clear();
                        }
                    } else if in_record && !is_title_markup(&name) {
                        // an unexpected element inside a field ends it
                        field = None;
                    }
                }
                Ok(Event::End(ref e)) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                    if record_kind(&name).is_some() {
                        if in_record {
                            sink.end_record();
                        }
                        in_record = false;
                        field = None;
                    } else if in_record && !is_title_markup(&name) {
                        if let Some(f) = field.take() {
                            let value = text.trim().to_string();
                            sink.field(match f {
                                Field::Author => RecordField::Author(value),
                                Field::Title => RecordField::Title(value),
                                Field::Year => RecordField::Year(value),
                            });
                        }
                    }
                }
                Ok(Event::Text(e)) => {
                    if field.is_some() {
                        let unescaped = e
                            .unescape()
                            .map_err(|err| SourceError::Malformed(err.to_string()))?;
                        text.push_str(&unescaped);
                    }
                }
                Ok(Event::CData(e)) => {
                    if field.is_some() {
                        text.push_str(&String::from_utf8_lossy(&e));
                    }
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(err) => {
                    tracing::warn!(error = %err, "xml record stream aborted");
                    return Err(SourceError::Malformed(err.to_string()));
                }
            }
            buf.clear();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bibcorpus_core::ingest::load;
    use std::io::Write;

    #[test]
    fn test_parses_all_record_kinds() {
        let xml = r#"<dblp>
            <inproceedings key="a"><author>A A</author><title>P</title><year>2000</year></inproceedings>
            <article><author>B B</author><title>J</title><year>2001</year></article>
            <book><author>C C</author><title>B</title><year>2002</year></book>
            <incollection><author>D D</author><title>C</title><year>2003</year></incollection>
        </dblp>"#;
        let mut source = DblpXmlSource::from_str(xml);
        let outcome = load(&mut source);
        assert!(outcome.ok);
        let corpus = outcome.corpus;
        assert_eq!(corpus.publication_count(), 4);
        let kinds: Vec<PublicationKind> =
            corpus.publications().iter().map(|p| p.kind).collect();
        assert_eq!(
            kinds,
            vec![
                PublicationKind::ConferencePaper,
                PublicationKind::Journal,
                PublicationKind::Book,
                PublicationKind::BookChapter,
            ]
        );
        assert_eq!(corpus.min_year(), Some(2000));
        assert_eq!(corpus.max_year(), Some(2003));
    }

    #[test]
    fn test_title_markup_is_flattened() {
        let xml = "<dblp><article>\
            <author>A A</author>\
            <title>On H<sub>2</sub>O and e<sup>x</sup> in <i>situ</i></title>\
            <year>1999</year>\
        </article></dblp>";
        let mut source = DblpXmlSource::from_str(xml);
        let corpus = load(&mut source).corpus;
        assert_eq!(
            corpus.publications()[0].title.as_deref(),
            Some("On H2O and ex in situ")
        );
    }

    #[test]
    fn test_entities_are_unescaped() {
        let xml = "<dblp><article>\
            <author>A &amp; B</author>\
            <title>Q &lt; R</title>\
            <year>2005</year>\
        </article></dblp>";
        let mut source = DblpXmlSource::from_str(xml);
        let corpus = load(&mut source).corpus;
        assert_eq!(
            corpus.author_name(bibcorpus_domain::AuthorId(0)).unwrap(),
            "A & B"
        );
        assert_eq!(corpus.publications()[0].title.as_deref(), Some("Q < R"));
    }

    #[test]
    fn test_cdata_text_is_captured() {
        let xml = "<dblp><article>\
            <author><![CDATA[A A]]></author>\
            <title>Notes on <![CDATA[x < y & y < z]]></title>\
            <year>2007</year>\
        </article></dblp>";
        let mut source = DblpXmlSource::from_str(xml);
        let outcome = load(&mut source);
        assert!(outcome.ok);
        let corpus = outcome.corpus;
        assert_eq!(
            corpus.author_name(bibcorpus_domain::AuthorId(0)).unwrap(),
            "A A"
        );
        assert_eq!(
            corpus.publications()[0].title.as_deref(),
            Some("Notes on x < y & y < z")
        );
    }

    #[test]
    fn test_unrelated_elements_are_skipped() {
        let xml = "<dblp><article>\
            <author>A A</author>\
            <title>T</title>\
            <pages>1-10</pages>\
            <journal>Somewhere</journal>\
            <year>2010</year>\
        </article></dblp>";
        let mut source = DblpXmlSource::from_str(xml);
        let outcome = load(&mut source);
        assert!(outcome.ok);
        assert_eq!(outcome.corpus.publications()[0].year, 2010);
    }

    #[test]
    fn test_malformed_xml_fails_the_load() {
        let xml = "<dblp><article><author>A A</author></book></dblp>";
        let mut source = DblpXmlSource::from_str(xml);
        let outcome = load(&mut source);
        assert!(!outcome.ok);
    }

    #[test]
    fn test_from_path_reads_a_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "<dblp><book><author>E E</author><title>T</title><year>2020</year></book></dblp>"
        )
        .unwrap();
        let mut source = DblpXmlSource::from_path(file.path()).unwrap();
        let outcome = load(&mut source);
        assert!(outcome.ok);
        assert_eq!(outcome.corpus.publication_count(), 1);
    }
}

use crate::error::CorpusError;

/// One side of a word-aligned sentence pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedSentence {
    pub tokens: Vec<String>,
    /// Whitespace around tokens; one more entry than there are tokens
    pub delimiters: Vec<String>,
    pub language: String,
    /// For each token position, the linked positions in the other sentence
    pub alignment: Vec<Vec<usize>>,
}

impl AlignedSentence {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn links(&self, index: usize) -> &[usize] {
        self.alignment.get(index).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Source,
    Target,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::Source => Side::Target,
            Side::Target => Side::Source,
        }
    }
}

/// A sentence and its translation, aligned word by word in both directions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentencePair {
    pub source: AlignedSentence,
    pub target: AlignedSentence,
}

impl SentencePair {
    /// Build a pair from whitespace-tokenized lines and Moses-format `i-j` links.
    pub fn parse(
        source_line: &str,
        target_line: &str,
        alignment_line: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<Self, CorpusError> {
        let source_tokens: Vec<String> = source_line.split_whitespace().map(str::to_string).collect();
        let target_tokens: Vec<String> = target_line.split_whitespace().map(str::to_string).collect();
        let (sl, tl) = (source_tokens.len(), target_tokens.len());

        let mut source_to_target = vec![Vec::new(); sl];
        for link in alignment_line.split_whitespace() {
            let (i, j) = parse_link(link)?;
            if i >= sl || j >= tl {
                return Err(CorpusError::LinkOutOfRange {
                    link: link.to_string(),
                    source_len: sl,
                    target_len: tl,
                });
            }
            source_to_target[i].push(j);
        }

        Ok(Self::build(
            source_tokens,
            default_delimiters(sl),
            target_tokens,
            default_delimiters(tl),
            source_to_target,
            source_language,
            target_language,
        ))
    }

    /// Build a pair from pre-tokenized sentences and a source-to-target link
    /// matrix. The target-to-source direction is derived.
    pub fn create(
        source_tokens: Vec<String>,
        source_delimiters: Vec<String>,
        target_tokens: Vec<String>,
        target_delimiters: Vec<String>,
        source_to_target: Vec<Vec<usize>>,
        source_language: &str,
        target_language: &str,
    ) -> Result<Self, CorpusError> {
        let (sl, tl) = (source_tokens.len(), target_tokens.len());
        let mut links = source_to_target;
        if links.len() > sl {
            return Err(CorpusError::LinkOutOfRange {
                link: format!("{}-?", links.len() - 1),
                source_len: sl,
                target_len: tl,
            });
        }
        links.resize(sl, Vec::new());
        if let Some((i, &j)) = links
            .iter()
            .enumerate()
            .find_map(|(i, ls)| ls.iter().find(|&&j| j >= tl).map(|j| (i, j)))
        {
            return Err(CorpusError::LinkOutOfRange {
                link: format!("{i}-{j}"),
                source_len: sl,
                target_len: tl,
            });
        }

        Ok(Self::build(
            source_tokens,
            source_delimiters,
            target_tokens,
            target_delimiters,
            links,
            source_language,
            target_language,
        ))
    }

    fn build(
        source_tokens: Vec<String>,
        source_delimiters: Vec<String>,
        target_tokens: Vec<String>,
        target_delimiters: Vec<String>,
        source_to_target: Vec<Vec<usize>>,
        source_language: &str,
        target_language: &str,
    ) -> Self {
        let target_to_source = reverse(&source_to_target, target_tokens.len());
        Self {
            source: AlignedSentence {
                tokens: source_tokens,
                delimiters: source_delimiters,
                language: source_language.to_string(),
                alignment: source_to_target,
            },
            target: AlignedSentence {
                tokens: target_tokens,
                delimiters: target_delimiters,
                language: target_language.to_string(),
                alignment: target_to_source,
            },
        }
    }

    pub fn side(&self, side: Side) -> &AlignedSentence {
        match side {
            Side::Source => &self.source,
            Side::Target => &self.target,
        }
    }

    /// The token one-to-one aligned to position `index` of `side`, if any.
    ///
    /// The position must link to exactly one token in the other sentence and
    /// that token must link back to exactly one position.
    pub fn one_to_one(&self, side: Side, index: usize) -> Option<&str> {
        let other = self.side(side.other());
        match self.side(side).links(index) {
            [linked] if other.links(*linked).len() == 1 => {
                other.tokens.get(*linked).map(String::as_str)
            }
            _ => None,
        }
    }
}

fn parse_link(link: &str) -> Result<(usize, usize), CorpusError> {
    let malformed = || CorpusError::MalformedLink(link.to_string());
    let (i, j) = link.split_once('-').ok_or_else(malformed)?;
    let i: usize = i.parse().map_err(|_| malformed())?;
    let j: usize = j.parse().map_err(|_| malformed())?;
    Ok((i, j))
}

/// Invert a directional link matrix onto a sentence of `len` tokens
fn reverse(links: &[Vec<usize>], len: usize) -> Vec<Vec<usize>> {
    let mut reversed = vec![Vec::new(); len];
    for (i, targets) in links.iter().enumerate() {
        for &j in targets {
            reversed[j].push(i);
        }
    }
    reversed
}

/// No space before the first token or after the last, single spaces between.
pub fn default_delimiters(len: usize) -> Vec<String> {
    (0..=len)
        .map(|i| (if i == 0 || i == len { "" } else { " " }).to_string())
        .collect()
}

//! Inverted index over the tokenized corpus
//!
//! This module provides:
//! - PostingEntry / PostingList: per-term document occurrences
//! - InvertedIndex: term dictionary, posting lists and length statistics
//!
//! # Architectural Rules
//!
//! - Built once from the full corpus; there is no add/remove API
//! - Terms get dense ids in first-seen order, so every aggregate computed by
//!   walking the vocabulary is independent of hash iteration order
//! - Documents are identified by their position in the collection

use rustc_hash::FxHashMap;

/// Dense term identifier (position in the vocabulary)
pub type TermId = u32;

/// Document identifier (position in the collection)
pub type DocId = u32;

// ============================================================================
// PostingEntry
// ============================================================================

/// Entry in a posting list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostingEntry {
    /// Position of the document in the collection
    pub doc_id: DocId,
    /// Term frequency in this document
    pub tf: u32,
}

impl PostingEntry {
    /// Create a new posting entry
    pub fn new(doc_id: DocId, tf: u32) -> Self {
        PostingEntry { doc_id, tf }
    }
}

// ============================================================================
// PostingList
// ============================================================================

/// List of documents containing a term, ordered by doc id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostingList {
    /// Document entries
    pub entries: Vec<PostingEntry>,
}

impl PostingList {
    /// Create a new empty posting list
    pub fn new() -> Self {
        PostingList { entries: vec![] }
    }

    /// Add an entry to the posting list
    pub fn add(&mut self, entry: PostingEntry) {
        self.entries.push(entry);
    }

    /// Number of documents containing this term
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if posting list is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// InvertedIndex
// ============================================================================

/// Inverted index for BM25 scoring
///
/// Read-only after construction, so it is `Send + Sync` and can be shared
/// between readers without locking.
#[derive(Debug, Clone, Default)]
pub struct InvertedIndex {
    /// Term -> dense id
    term_ids: FxHashMap<String, TermId>,

    /// Terms in id order
    terms: Vec<String>,

    /// Posting list per term id
    postings: Vec<PostingList>,

    /// Token count per document
    doc_lengths: Vec<u32>,

    /// Sum of all document lengths
    total_doc_len: u64,
}

impl InvertedIndex {
    /// Build the index from tokenized documents.
    ///
    /// `documents[i]` becomes doc id `i`. Empty documents are legal: they
    /// count towards the corpus size and the average length but appear in
    /// no posting list.
    pub fn from_documents(documents: &[Vec<String>]) -> Self {
        let mut index = InvertedIndex {
            doc_lengths: Vec::with_capacity(documents.len()),
            ..Default::default()
        };

        for (doc_id, tokens) in documents.iter().enumerate() {
            let doc_id = doc_id as DocId;
            let doc_len = tokens.len() as u32;

            // Count term frequencies, remembering first-seen order
            let mut order: Vec<TermId> = Vec::new();
            let mut tf_map: FxHashMap<TermId, u32> = FxHashMap::default();
            for token in tokens {
                let term_id = index.intern(token);
                let tf = tf_map.entry(term_id).or_insert(0);
                if *tf == 0 {
                    order.push(term_id);
                }
                *tf += 1;
            }

            for term_id in order {
                let tf = tf_map[&term_id];
                index.postings[term_id as usize].add(PostingEntry::new(doc_id, tf));
            }

            index.doc_lengths.push(doc_len);
            index.total_doc_len += u64::from(doc_len);
        }

        index
    }

    /// Get or assign the id of a term
    fn intern(&mut self, term: &str) -> TermId {
        if let Some(&id) = self.term_ids.get(term) {
            return id;
        }
        let id = self.terms.len() as TermId;
        self.term_ids.insert(term.to_string(), id);
        self.terms.push(term.to_string());
        self.postings.push(PostingList::new());
        id
    }

    // ========================================================================
    // Statistics
    // ========================================================================

    /// Total number of documents, including empty ones
    pub fn total_docs(&self) -> usize {
        self.doc_lengths.len()
    }

    /// Number of distinct terms
    pub fn vocabulary_size(&self) -> usize {
        self.terms.len()
    }

    /// Terms in id order
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Id of a term, if it occurs anywhere in the corpus
    pub fn term_id(&self, term: &str) -> Option<TermId> {
        self.term_ids.get(term).copied()
    }

    /// Number of documents containing a term
    pub fn doc_freq(&self, term: &str) -> usize {
        self.term_id(term)
            .map(|id| self.postings[id as usize].len())
            .unwrap_or(0)
    }

    /// Posting list for a term id
    pub fn postings(&self, term_id: TermId) -> &PostingList {
        &self.postings[term_id as usize]
    }

    /// Posting lists in term id order
    pub fn posting_lists(&self) -> &[PostingList] {
        &self.postings
    }

    /// Token count of a document
    pub fn doc_len(&self, doc_id: DocId) -> u32 {
        self.doc_lengths[doc_id as usize]
    }

    /// Average document length; 0.0 for an empty corpus
    pub fn avg_doc_len(&self) -> f64 {
        if self.doc_lengths.is_empty() {
            return 0.0;
        }
        self.total_doc_len as f64 / self.doc_lengths.len() as f64
    }
}

// ============================================================================
// Tests
// ============================================================================

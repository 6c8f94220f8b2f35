//! Tag tables onto the Universal Tagset (Petrov, Das & McDonald, 2011).

use super::TagTable;

/// Penn Treebank, English.
pub(super) static PENN_EN: TagTable = &[
    ("CC", "CONJ"),
    ("CD", "NUM"),
    ("DT", "DET"),
    ("EX", "DET"),
    ("FW", "X"),
    ("IN", "ADP"),
    ("JJ", "ADJ"),
    ("JJR", "ADJ"),
    ("JJS", "ADJ"),
    ("LS", "X"),
    ("MD", "VERB"),
    ("NN", "NOUN"),
    ("NNS", "NOUN"),
    ("NNP", "NOUN"),
    ("NNPS", "NOUN"),
    ("PDT", "DET"),
    ("POS", "PRT"),
    ("PRP", "PRON"),
    ("PRP$", "PRON"),
    ("RB", "ADV"),
    ("RBR", "ADV"),
    ("RBS", "ADV"),
    ("RP", "PRT"),
    ("SYM", "X"),
    ("TO", "PRT"),
    ("UH", "X"),
    ("VB", "VERB"),
    ("VBZ", "VERB"),
    ("VBP", "VERB"),
    ("VBD", "VERB"),
    ("VBN", "VERB"),
    ("VBG", "VERB"),
    ("WDT", "DET"),
    ("WP", "PRON"),
    ("WP$", "PRON"),
    ("WRB", "ADV"),
    ("(", "."),
    (")", "."),
    (",", "."),
    (":", "."),
    (".", "."),
    ("''", "."),
    ("``", "."),
    ("#", "."),
    ("$", "."),
];

/// FreeLing, English. Includes the compound tags FreeLing assigns to
/// contractions (`PRP+MD+RB+VBP` for "i'dn't've").
pub(super) static FREELING_EN: TagTable = &[
    ("CC", "CONJ"),
    ("DT", "DET"),
    ("DT+MD", "DET"),
    ("DT+VB", "DET"),
    ("DT+VBD/MD", "DET"),
    ("EX", "DET"),
    ("IN", "ADP"),
    ("JJ", "ADJ"),
    ("JJR", "ADJ"),
    ("JJS", "ADJ"),
    ("MD", "VERB"),
    ("MD+RB", "VERB"),
    ("MD+RB+VBP", "VERB"),
    ("MD+VB", "VERB"),
    ("NN", "NOUN"),
    ("NNS", "NOUN"),
    ("POS", "PRT"),
    ("PRP", "PRON"),
    ("PRP$", "PRON"),
    ("PRP+DT", "PRON"),
    ("PRP+MD", "PRON"),
    ("PRP+MD+RB", "PRON"),
    ("PRP+MD+RB+VBP", "PRON"),
    ("PRP+MD+VBP", "PRON"),
    ("PRP+VB", "PRON"),
    ("PRP+VBD/MD", "PRON"),
    ("PRP+VBP", "PRON"),
    ("RB", "ADV"),
    ("RB+MD", "ADV"),
    ("RB+VBD/MD", "ADV"),
    ("RB+VBZ", "ADV"),
    ("RBR", "ADV"),
    ("RBS", "ADV"),
    ("RP", "PRT"),
    ("TO", "PRT"),
    ("UH", "X"),
    ("VB", "VERB"),
    ("VB+PRP", "VERB"),
    ("VB+RB", "VERB"),
    ("VBD", "VERB"),
    ("VBD+RB", "VERB"),
    ("VBG", "VERB"),
    ("VBN", "VERB"),
    ("VBP", "VERB"),
    ("VBP+RB", "VERB"),
    ("VBZ", "VERB"),
    ("VBZ+RB", "VERB"),
    ("WDT", "DET"),
    ("WP", "PRON"),
    ("WP$", "PRON"),
    ("WP+MD", "PRON"),
    ("WP+MD+VBP", "PRON"),
    ("WP+VB", "PRON"),
    ("WP+VBD/MD", "PRON"),
    ("WP+VBP", "PRON"),
    ("WRB", "ADV"),
    ("WRB+VB", "ADV"),
];

/// WordNet synset categories. `s` is the satellite adjective.
pub(super) static WORDNET_EN: TagTable = &[
    ("n", "NOUN"),
    ("v", "VERB"),
    ("a", "ADJ"),
    ("s", "ADJ"),
    ("r", "ADV"),
];

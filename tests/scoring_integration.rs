//! Lexicon files through to scores, via the public API.

use std::io::Write;
use std::sync::Arc;

use attune::embedding::{EmbeddingCache, EmbeddingProvider, MockEmbeddingProvider};
use attune::lexicon::{AnchorLexicon, LexiconError, SelectionLexicon};
use attune::scoring::{Selection, SelectionScorer, SimilarityScorer, score_selections};
use attune::state::{RegulationState, StateScores};
use tempfile::NamedTempFile;

fn write_csv(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write csv");
    file.flush().expect("flush csv");
    file
}

fn scorer_for(lexicon: AnchorLexicon, provider: Arc<MockEmbeddingProvider>) -> SimilarityScorer {
    let provider: Arc<dyn EmbeddingProvider> = provider;
    let cache = Arc::new(EmbeddingCache::new(provider));
    SimilarityScorer::new(Arc::new(lexicon), cache, 0.7).expect("scorer")
}

#[test]
fn test_anchor_file_to_scores() {
    let file = write_csv(
        "Word,Hypo,Hyper,Flow\n\
         Calm,0,0,1\n\
         numb,0.9,,0.1\n\
         calm,0,0.5,0.5\n",
    );
    let lexicon = AnchorLexicon::from_path(file.path()).unwrap();

    assert_eq!(lexicon.anchors(), ["calm", "numb"]);
    assert_eq!(lexicon.weights("calm"), Some(StateScores::new(0.0, 0.5, 0.5)));

    let provider = Arc::new(MockEmbeddingProvider::new());
    let scorer = scorer_for(lexicon, provider.clone());

    let result = scorer.score("Calm. Calm!").unwrap();
    assert_eq!(result.matched.len(), 2);
    assert_eq!(result.percentages, StateScores::new(0.0, 50.0, 50.0));
    assert_eq!(result.dominant, Some(RegulationState::Hyper));
}

#[test]
fn test_repeated_scoring_reuses_cached_vectors() {
    let file = write_csv("word,hypo,hyper,flow\ncalm,0,0,1\nanxious,0,1,0\n");
    let lexicon = AnchorLexicon::from_path(file.path()).unwrap();
    let provider = Arc::new(MockEmbeddingProvider::new());
    let scorer = scorer_for(lexicon, provider.clone());

    let first = scorer.score("anxious but calm").unwrap();
    let calls = provider.call_count();
    let second = scorer.score("anxious but calm").unwrap();

    assert_eq!(first, second);
    assert_eq!(provider.call_count(), calls);
    assert!(scorer.cache().contains("anxious"));
}

#[test]
fn test_selection_file_to_scores() {
    let file = write_csv(
        "word,state,weight\n\
         Numb,HYPO,1.0\n\
         anxious,hyper,0.5\n\
         calm,flow,\n",
    );
    let lexicon = SelectionLexicon::from_path(file.path()).unwrap();
    assert_eq!(lexicon.len(), 3);

    let scorer = SelectionScorer::new(Arc::new(lexicon));
    let pct = scorer.score(&[
        Selection::new("numb", 1.0),
        Selection::new("anxious", 2.0),
        Selection::new("calm", 10.0),
    ]);

    assert_eq!(pct, StateScores::new(50.0, 50.0, 0.0));
    assert_eq!(
        score_selections(&[Selection::new("calm", 3.0)], scorer.lexicon()),
        StateScores::ZERO
    );
}

#[test]
fn test_malformed_files_fail_to_load() {
    let missing_column = write_csv("term,hypo,hyper,flow\ncalm,0,0,1\n");
    assert!(matches!(
        AnchorLexicon::from_path(missing_column.path()),
        Err(LexiconError::MissingColumn { column: "word" })
    ));

    let bad_state = write_csv("word,state,weight\ncalm,serene,1\n");
    assert!(matches!(
        SelectionLexicon::from_path(bad_state.path()),
        Err(LexiconError::UnknownState { .. })
    ));

    assert!(matches!(
        AnchorLexicon::from_path("/no/such/lexicon.csv"),
        Err(LexiconError::NotFound { .. })
    ));
}

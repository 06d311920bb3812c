#![allow(missing_docs)]

use std::fs;
use std::path::Path;

use lexgraph::{
    Anchor, Dictionary, LexError, Mode, Offset, PartOfSpeech, PointerKind, Result, StoreOptions,
    SynsetId, SynsetKind,
};
use tempfile::TempDir;

fn fresh(dir: &TempDir) -> StoreOptions {
    StoreOptions::new(dir.path().join("dict")).create_if_missing(true)
}

fn read(root: &Path, name: &str) -> String {
    fs::read_to_string(root.join(name)).expect("read dictionary file")
}

/// Builds `entity` with a `physical entity` hyponym and one exception, then saves.
fn seed(options: &StoreOptions) -> Result<(SynsetId, SynsetId)> {
    let mut dict = Dictionary::open(options.clone())?;
    dict.edit();
    dict.add_exception(
        PartOfSpeech::Noun,
        "aardwolves",
        vec!["aardwolf".to_string()],
    )?;
    let entity = dict.create_synset(SynsetKind::Noun)?;
    dict.add_word(entity, "entity")?;
    dict.set_gloss(entity, "that which is perceived or known or inferred")?;
    let physical = dict.create_synset(SynsetKind::Noun)?;
    dict.add_word(physical, "physical entity")?;
    dict.set_gloss(physical, "an entity that has physical existence")?;
    dict.add_pointer(
        PointerKind::Hypernym,
        Anchor::Synset(physical),
        Anchor::Synset(entity),
    )?;
    dict.save()?;
    dict.close();
    Ok((entity, physical))
}

#[test]
fn empty_dictionary_saves_empty_files() -> Result<()> {
    let dir = TempDir::new()?;
    let options = fresh(&dir);
    let mut dict = Dictionary::open(options.clone())?;
    assert_eq!(dict.mode(), Mode::Read);
    assert_eq!(dict.graph().synset_count(), 0);
    dict.edit();
    let stats = dict.save()?;
    assert_eq!(stats.synsets, 0);
    for name in ["data.noun", "index.verb", "adj.exc", "data.adv"] {
        assert_eq!(read(&options.root, name), "");
    }
    Ok(())
}

#[test]
fn missing_directory_needs_create_flag() {
    let dir = TempDir::new().expect("tempdir");
    let options = StoreOptions::new(dir.path().join("absent"));
    assert!(matches!(Dictionary::open(options), Err(LexError::NotFound(_))));
}

#[test]
fn read_mode_rejects_edits() -> Result<()> {
    let dir = TempDir::new()?;
    let mut dict = Dictionary::open(fresh(&dir))?;
    assert!(matches!(dict.create_synset(SynsetKind::Noun), Err(LexError::ReadOnly)));
    assert!(matches!(dict.save(), Err(LexError::ReadOnly)));
    Ok(())
}

#[test]
fn saved_files_use_the_canonical_layout() -> Result<()> {
    let dir = TempDir::new()?;
    let options = fresh(&dir);
    let (entity, physical) = seed(&options)?;
    assert_eq!(entity.offset, Offset(1));
    assert_eq!(physical.offset, Offset(2));

    assert_eq!(
        read(&options.root, "data.noun"),
        "00000001 00 n 01 entity 0 001 ~ 00000002 n 0000 | that which is perceived or known or inferred  \n\
         00000002 00 n 01 physical_entity 0 001 @ 00000001 n 0000 | an entity that has physical existence  \n"
    );
    assert_eq!(
        read(&options.root, "index.noun"),
        "entity n 1 1 ~ 1 0 00000001  \nphysical_entity n 1 1 @ 1 0 00000002  \n"
    );
    assert_eq!(read(&options.root, "noun.exc"), "aardwolves aardwolf\n");
    Ok(())
}

#[test]
fn reload_restores_the_graph() -> Result<()> {
    let dir = TempDir::new()?;
    let options = fresh(&dir);
    let (entity, physical) = seed(&options)?;

    let dict = Dictionary::open(options)?;
    let stats = dict.load_stats();
    assert_eq!(stats.synsets, 2);
    assert_eq!(stats.index_entries, 2);
    assert_eq!(stats.exceptions, 1);
    assert_eq!(stats.mirrors_added, 0);

    let graph = dict.graph();
    let parent = graph.synset(entity).expect("entity");
    assert_eq!(parent.words[0].lemma, "entity");
    assert_eq!(
        parent.gloss.as_deref(),
        Some("that which is perceived or known or inferred")
    );
    let hyponyms: Vec<_> = parent.pointers_of(PointerKind::Hyponym).collect();
    assert_eq!(hyponyms.len(), 1);
    assert_eq!(hyponyms[0].target, Anchor::Synset(physical));

    let senses = graph.senses(PartOfSpeech::Noun, "physical entity");
    assert_eq!(senses.len(), 1);
    assert_eq!(senses[0].id, physical);
    assert_eq!(
        graph
            .exception(PartOfSpeech::Noun, "aardwolves")
            .map(|e| e.bases.clone()),
        Some(vec!["aardwolf".to_string()])
    );
    Ok(())
}

#[test]
fn offsets_resume_after_the_largest_loaded() -> Result<()> {
    let dir = TempDir::new()?;
    let options = fresh(&dir);
    seed(&options)?;

    let mut dict = Dictionary::open(options.clone())?;
    dict.edit();
    let verb = dict.create_synset(SynsetKind::Verb)?;
    assert_eq!(verb.offset, Offset(3));
    dict.add_word(verb, "exist")?;
    dict.set_verb_frame(verb, 1, 0)?;
    dict.save()?;

    assert_eq!(
        read(&options.root, "data.verb"),
        "00000003 00 v 01 exist 0 000 01 + 01 00  \n"
    );
    Ok(())
}

#[test]
fn saving_twice_is_stable() -> Result<()> {
    let dir = TempDir::new()?;
    let options = fresh(&dir);
    seed(&options)?;
    let before = read(&options.root, "data.noun");

    let mut dict = Dictionary::open(options.clone())?;
    dict.edit();
    dict.save()?;
    assert_eq!(read(&options.root, "data.noun"), before);
    Ok(())
}

#[test]
fn loading_fills_in_missing_mirrors() -> Result<()> {
    let dir = TempDir::new()?;
    let root = dir.path();
    fs::write(
        root.join("data.noun"),
        "  1 This software and database is being provided\n\
         00000001 03 n 01 entity 0 000 | g  \n\
         00000002 03 n 01 physical_entity 0 001 @ 00000001 n 0000 | g  \n",
    )?;
    let dict = Dictionary::open(StoreOptions::new(root))?;
    assert_eq!(dict.load_stats().mirrors_added, 1);
    let parent = dict
        .graph()
        .synset(SynsetId::new(PartOfSpeech::Noun, 1))
        .expect("entity");
    assert_eq!(parent.pointers_of(PointerKind::Hyponym).count(), 1);

    let untouched = Dictionary::open(StoreOptions::new(root).reconcile_mirrors(false))?;
    assert_eq!(untouched.load_stats().mirrors_added, 0);
    Ok(())
}

#[test]
fn decode_failure_aborts_open() -> Result<()> {
    let dir = TempDir::new()?;
    fs::write(
        dir.path().join("data.noun"),
        "00000001 03 n 01 entity 0 001 ?? 00000002 n 0000 | g  \n",
    )?;
    match Dictionary::open(StoreOptions::new(dir.path())) {
        Err(LexError::UnknownRelationKind { token, position, .. }) => {
            assert_eq!(token, "??");
            assert_eq!(position, 7);
        }
        other => panic!("unexpected {:?}", other.map(|_| ())),
    }
    Ok(())
}

#[test]
fn delete_removes_files_and_directory() -> Result<()> {
    let dir = TempDir::new()?;
    let options = fresh(&dir);
    seed(&options)?;
    let dict = Dictionary::open(options.clone())?;
    dict.delete()?;
    assert!(!options.root.exists());
    Ok(())
}

#[test]
fn delete_keeps_foreign_files() -> Result<()> {
    let dir = TempDir::new()?;
    let options = fresh(&dir);
    seed(&options)?;
    fs::write(options.root.join("README"), "notes")?;
    Dictionary::open(options.clone())?.delete()?;
    assert!(options.root.join("README").exists());
    assert!(!options.root.join("data.noun").exists());
    Ok(())
}

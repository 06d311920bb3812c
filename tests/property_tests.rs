#![allow(missing_docs)]

use lexgraph::codec::{
    decode_exception, decode_index, decode_synset, encode_exception, encode_index, encode_synset,
};
use lexgraph::{
    Anchor, FrameSet, LexError, LexGraph, PartOfSpeech, PointerKind, Result, SequentialAllocator,
    SynsetId, SynsetKind,
};
use proptest::prelude::*;

#[derive(Debug, Clone)]
struct SynsetPlan {
    kind: SynsetKind,
    lemmas: Vec<String>,
    lex_ids: Vec<u8>,
    gloss: Option<String>,
}

#[derive(Debug, Clone)]
enum Operation {
    Pointer {
        kind: usize,
        source: (usize, u8),
        target: (usize, u8),
    },
    Frame {
        synset: usize,
        frame: u8,
        word: u8,
    },
}

fn arb_kind() -> impl Strategy<Value = SynsetKind> {
    prop_oneof![
        Just(SynsetKind::Noun),
        Just(SynsetKind::Verb),
        Just(SynsetKind::Adjective),
        Just(SynsetKind::AdjectiveSatellite),
        Just(SynsetKind::Adverb),
    ]
}

fn arb_synset_plan() -> impl Strategy<Value = SynsetPlan> {
    (
        arb_kind(),
        prop::collection::vec("[a-z]{1,8}( [a-z]{1,6})?", 1..=4),
        prop::collection::vec(0u8..16, 4),
        prop::option::of("[A-Za-z][a-z ,;()\"']{0,40}"),
    )
        .prop_map(|(kind, lemmas, lex_ids, gloss)| SynsetPlan {
            kind,
            lemmas,
            lex_ids,
            gloss,
        })
}

fn arb_operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        (0usize..64, (0usize..8, 0u8..5), (0usize..8, 0u8..5)).prop_map(
            |(kind, source, target)| Operation::Pointer {
                kind,
                source,
                target
            }
        ),
        (0usize..8, 1u8..=35, 0u8..5).prop_map(|(synset, frame, word)| Operation::Frame {
            synset,
            frame,
            word
        }),
    ]
}

/// Passes through the rejections random operations are expected to hit and
/// fails on anything else.
fn expected_rejection<T>(result: Result<T>) {
    match result {
        Ok(_)
        | Err(LexError::DuplicateMirrorConflict { .. })
        | Err(LexError::InvalidArgument(_))
        | Err(LexError::InvalidLinkIndex { .. }) => {}
        Err(err) => panic!("unexpected {err}"),
    }
}

fn build(plans: &[SynsetPlan], ops: &[Operation]) -> (LexGraph, Vec<SynsetId>) {
    let mut graph = LexGraph::new();
    let mut alloc = SequentialAllocator::new(1740);
    let mut ids = Vec::new();
    for plan in plans {
        let id = graph.create_synset(plan.kind, &mut alloc).unwrap();
        for (i, lemma) in plan.lemmas.iter().enumerate() {
            let index = graph.add_word(id, lemma).unwrap();
            graph.set_lex_id(id, index, plan.lex_ids[i]).unwrap();
        }
        graph.set_gloss(id, plan.gloss.clone()).unwrap();
        ids.push(id);
    }

    let kinds: Vec<PointerKind> = PointerKind::all().collect();
    let anchor = |graph: &LexGraph, (synset, word): (usize, u8)| {
        let id = ids[synset % ids.len()];
        let words = graph.synset(id).map_or(0, |s| s.words.len()) as u8;
        Anchor::from_link(id, word % (words + 1))
    };
    for op in ops {
        match *op {
            Operation::Pointer {
                kind,
                source,
                target,
            } => {
                let source = anchor(&graph, source);
                let target = anchor(&graph, target);
                expected_rejection(graph.add_pointer(kinds[kind % kinds.len()], source, target));
            }
            Operation::Frame {
                synset,
                frame,
                word,
            } => {
                let id = ids[synset % ids.len()];
                expected_rejection(graph.set_verb_frame(id, frame, word));
            }
        }
    }
    (graph, ids)
}

proptest! {
    #[test]
    fn prop_encoded_synsets_decode_to_the_same_synset(
        plans in prop::collection::vec(arb_synset_plan(), 2..6),
        ops in prop::collection::vec(arb_operation(), 0..40),
    ) {
        let (graph, ids) = build(&plans, &ops);
        for id in ids {
            let synset = graph.synset(id).unwrap();
            let line = encode_synset(synset);
            let decoded = decode_synset(id.pos, &line).unwrap();
            prop_assert_eq!(&decoded, synset);
            prop_assert_eq!(encode_synset(&decoded), line);
        }
    }

    #[test]
    fn prop_every_mirrored_edge_has_its_partner(
        plans in prop::collection::vec(arb_synset_plan(), 2..6),
        ops in prop::collection::vec(arb_operation(), 0..40),
    ) {
        let (graph, ids) = build(&plans, &ops);
        for id in &ids {
            let synset = graph.synset(*id).unwrap();
            for (i, pointer) in synset.pointers.iter().enumerate() {
                let repeats = synset.pointers[i + 1..]
                    .iter()
                    .filter(|p| p.same_edge(pointer.kind, &pointer.source, &pointer.target))
                    .count();
                prop_assert_eq!(repeats, 0);
                if let Some(mirror) = pointer.kind.mirror() {
                    let target = graph.synset(pointer.target.synset()).unwrap();
                    prop_assert!(target
                        .pointers
                        .iter()
                        .any(|p| p.same_edge(mirror, &pointer.target, &pointer.source)));
                }
            }
        }
    }

    #[test]
    fn prop_index_entries_reencode_unchanged(
        plans in prop::collection::vec(arb_synset_plan(), 2..6),
        ops in prop::collection::vec(arb_operation(), 0..40),
    ) {
        let (graph, _) = build(&plans, &ops);
        for pos in PartOfSpeech::ALL {
            for entry in graph.index_entries(pos) {
                let line = encode_index(entry);
                let decoded = decode_index(pos, &line).unwrap();
                prop_assert_eq!(&decoded, entry);
                prop_assert_eq!(encode_index(&decoded), line);
            }
        }
    }

    #[test]
    fn prop_exception_lines_reencode_unchanged(
        lemma in "[a-z]{1,6}(_[a-z]{1,6}){0,2}",
        bases in prop::collection::vec("[a-z-]{1,6}(_[a-z]{1,6}){0,2}", 1..4),
    ) {
        let line = format!("{lemma} {}", bases.join(" "));
        let decoded = decode_exception(PartOfSpeech::Verb, &line).unwrap();
        prop_assert_eq!(&decoded.lemma, &lemma.replace('_', " "));
        let expected: Vec<String> = bases.iter().map(|b| b.replace('_', " ")).collect();
        prop_assert_eq!(&decoded.bases, &expected);
        prop_assert_eq!(encode_exception(&decoded), line);
    }

    #[test]
    fn prop_frame_sets_iterate_sorted_and_deduplicated(frames in prop::collection::vec(0u8..=200, 0..64)) {
        let set: FrameSet = frames.iter().copied().collect();
        let mut expected: Vec<u8> = frames.into_iter().filter(|f| (1..=127).contains(f)).collect();
        expected.sort_unstable();
        expected.dedup();
        prop_assert_eq!(set.iter().collect::<Vec<_>>(), expected.clone());
        prop_assert_eq!(set.len(), expected.len());
    }
}

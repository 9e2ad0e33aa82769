//! Integration tests for sequences, adapters, terminals and generators

use std::collections::HashMap;
use std::time::Duration;

use futures::StreamExt;
use pullseq::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::runtime::Runtime;
use tokio_test::{assert_err, assert_ok};

fn runtime() -> Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .unwrap()
}

#[test]
fn test_collect_round_trips_a_list() {
    let lists: Vec<Vec<i32>> = vec![vec![], vec![7], vec![5, -1, 5, 0, 12]];

    for list in lists {
        assert_eq!(collect(sequence_from_list(list.clone())), list);
    }
}

#[test]
fn test_map_matches_elementwise_application() {
    let list = vec![1, 2, 3, 4, 5];
    let f = |x: &i32| x * x - 1;

    let expected: Vec<i32> = list.iter().map(f).collect();

    assert_eq!(collect(map(sequence_from_list(list), f)), expected);
}

#[test]
fn test_filter_matches_list_filtering() {
    let list: Vec<u32> = (0..30).collect();
    let p = |x: &u32| x % 4 == 1;

    let expected: Vec<u32> = list.iter().copied().filter(p).collect();

    assert_eq!(collect(filter(sequence_from_list(list), p)), expected);
}

#[test]
fn test_index_examples() {
    assert_eq!(index(sequence_from_list(vec![3, 1, 4, 1, 5]), &4), Some(2));
    assert_eq!(index(sequence_from_list(vec![3, 1, 4, 1, 5]), &9), None);
    assert!(contain(sequence_from_list(vec![3, 1, 4, 1, 5]), &5));
}

#[test]
fn test_reduce_example() {
    assert_eq!(
        reduce(sequence_from_list(vec![1, 2, 3, 4]), |acc, x| acc + x, 0),
        10
    );
}

#[test]
fn test_group_by_example() {
    let groups = group_by(sequence_from_list(vec!["a", "bb", "cc", "d"]), |s| s.len());

    let expected: HashMap<usize, Vec<&str>> =
        HashMap::from([(1, vec!["a", "d"]), (2, vec!["bb", "cc"])]);
    assert_eq!(groups, expected);
}

#[test]
fn test_slice_examples() {
    let list = vec![0, 1, 2, 3, 4, 5];

    assert_eq!(collect(slice(sequence_from_list(list.clone()), 2, 4)), vec![2, 3]);
    assert_eq!(
        collect(slice(sequence_from_list(list), 2, 100)),
        vec![2, 3, 4, 5]
    );
}

#[test]
fn test_shuffle_keeps_the_multiset() {
    let input = vec![4, 4, 1, 9, 9, 9, 0];

    for seed in 0..20 {
        let mut shuffled = collect(shuffle_with(
            sequence_from_list(input.clone()),
            &mut StdRng::seed_from_u64(seed),
        ));
        let mut sorted_input = input.clone();

        shuffled.sort();
        sorted_input.sort();
        assert_eq!(shuffled, sorted_input);
    }
}

#[test]
fn test_choice_on_empty_is_an_explicit_error() {
    let err = assert_err!(choice(sequence_from_list(Vec::<char>::new())));

    assert_eq!(err.to_string(), "cannot choose from an empty sequence");
}

#[test]
fn test_choice_picks_from_the_sequence() {
    let picked = assert_ok!(choice(sequence_from_list(vec![3, 6, 9]).filter(|x| *x > 3)));

    assert!(picked == 6 || picked == 9);
}

#[test]
fn test_complex_chain() {
    let source = sequence_from_list((1..21).collect::<Vec<i64>>())
        .filter(|x| x % 2 == 0) // Even numbers
        .map(|x| x * 3); // Multiply by 3

    assert_eq!(collect(slice(source, 0, 3)), vec![6, 12, 18]); // 2*3, 4*3, 6*3
}

#[test]
fn test_terminal_helpers_on_empty_input() {
    assert_eq!(max(sequence_from_list(Vec::<i32>::new())), zero::<i32>());
    assert_eq!(min(sequence_from_list(Vec::<i32>::new())), zero::<i32>());
    assert!(is_zero(&sum(sequence_from_list(Vec::<f32>::new()))));
    assert!(to_map(sequence_from_list(Vec::<u8>::new()), |x| *x).is_empty());
}

#[test]
fn test_repeat_delivers_exactly_n_then_ends() {
    let rt = runtime();
    let _guard = rt.enter();

    let (mut sequence, cancel) = repeat("x", 3).unwrap();

    let mut delivered = 0;
    while sequence.advance() {
        assert_eq!(sequence.current(), Some(&"x"));
        delivered += 1;
    }

    assert_eq!(delivered, 3);
    assert!(!sequence.advance());
    rt.block_on(cancel.join_timeout(Duration::from_secs(1))).unwrap();
}

#[test]
fn test_infinite_repeat_stops_delivering_after_cancel() {
    let rt = runtime();
    let _guard = rt.enter();

    let (mut sequence, cancel) = repeat(1u8, -1).unwrap();
    let before: Vec<u8> = (&mut sequence).iter().take(10).collect();
    assert_eq!(before, vec![1; 10]);

    cancel.cancel();

    assert!(!sequence.advance());
    assert!(!sequence.advance());
    rt.block_on(cancel.join_timeout(Duration::from_millis(500))).unwrap();
}

#[test]
fn test_generators_feed_adapters_and_terminals() {
    let rt = runtime();
    let _guard = rt.enter();

    let (numbers, cancel) = count(1u64, 1).unwrap();
    let odd_squares = map(filter(numbers, |n| n % 2 == 1), |n| n * n);

    assert_eq!(collect(slice(odd_squares, 0, 4)), vec![1, 9, 25, 49]);
    cancel.cancel();
}

#[test]
fn test_cycle_over_a_mapped_source() {
    let rt = runtime();
    let _guard = rt.enter();

    let tens = sequence_from_list(vec![1, 2]).map(|n| n * 10);
    let (sequence, cancel) = cycle(tens).unwrap();

    assert_eq!(collect(slice(sequence, 1, 6)), vec![20, 10, 20, 10, 20]);
    cancel.cancel();
}

#[tokio::test]
async fn test_generator_as_stream() {
    let (sequence, cancel) = count(5i32, 5).unwrap();

    let values: Vec<i32> = sequence.take(4).collect().await;
    cancel.cancel();

    assert_eq!(values, vec![5, 10, 15, 20]);
    cancel.join_timeout(Duration::from_secs(1)).await.unwrap();
}

#[tokio::test]
async fn test_advance_async_with_cancellation() {
    let (mut sequence, cancel) = repeat('z', -1).unwrap();

    assert!(sequence.advance_async().await);
    assert_eq!(sequence.current(), Some(&'z'));

    cancel.cancel();

    assert!(!sequence.advance_async().await);
    assert!(sequence.next().await.is_none());
    cancel.join_timeout(Duration::from_secs(1)).await.unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_terminals_on_generators_from_async_code() {
    let (numbers, cancel) = count(1i64, 1).unwrap();

    let total = reduce(slice(numbers, 0, 10), |acc, n| acc + n, 0);
    cancel.cancel();

    assert_eq!(total, 55);
    cancel.join_timeout(Duration::from_secs(1)).await.unwrap();
}

#[tokio::test]
async fn test_parent_token_stops_all_generators() {
    let shutdown = tokio_util::sync::CancellationToken::new();
    let generator = Generator::new().parent_token(shutdown.clone());

    let (_a, cancel_a) = generator.repeat(0, -1).unwrap();
    let (_b, cancel_b) = generator.cycle(sequence_from_list(vec![1, 2, 3])).unwrap();

    shutdown.cancel();

    cancel_a.join_timeout(Duration::from_secs(1)).await.unwrap();
    cancel_b.join_timeout(Duration::from_secs(1)).await.unwrap();
}

mod support;

use proptest::prelude::*;
use support::{ready_image, shot_pool};
use viper_shooter::compute::activate_shot;
use viper_shooter::entities::{Character, Heading};
use viper_shooter::pool::Pool;
use viper_shooter::surface::{ImageHandle, Readiness};

fn pool_with_life(lives: &[i32]) -> Pool {
    let image = ready_image("shot.png");
    Pool::new(
        lives
            .iter()
            .map(|&life| {
                let mut shot = Character::shot(8.0, 8.0, image.clone(), 7.0, Heading::Rightward);
                shot.body.life = life;
                shot
            })
            .collect(),
    )
}

fn lives(pool: &Pool) -> Vec<i32> {
    pool.iter().map(|c| c.body.life).collect()
}

#[test]
fn allocate_picks_lowest_free_slot() {
    let mut pool = pool_with_life(&[1, 0, 1, 0]);
    let index = pool.allocate(|shot| activate_shot(shot, 5.0, 5.0));
    assert_eq!(index, Some(1));
    assert_eq!(lives(&pool), vec![1, 1, 1, 0]);
}

#[test]
fn allocate_reuses_early_slots_first() {
    let mut pool = shot_pool(3, 8.0, 7.0, Heading::Rightward);
    assert_eq!(pool.allocate(|s| activate_shot(s, 0.0, 0.0)), Some(0));
    assert_eq!(pool.allocate(|s| activate_shot(s, 0.0, 0.0)), Some(1));
    pool.get_mut(0).unwrap().body.life = 0;
    assert_eq!(pool.allocate(|s| activate_shot(s, 0.0, 0.0)), Some(0));
}

#[test]
fn full_pool_drops_request() {
    let mut pool = pool_with_life(&[1, 1]);
    let mut called = false;
    assert_eq!(pool.allocate(|_| called = true), None);
    assert!(!called);
    assert_eq!(lives(&pool), vec![1, 1]);
}

#[test]
fn negative_life_counts_as_free() {
    let mut pool = pool_with_life(&[1, -3]);
    assert_eq!(pool.allocate(|s| activate_shot(s, 0.0, 0.0)), Some(1));
}

#[test]
fn slots_still_loading_are_not_eligible() {
    let loading = ImageHandle::pending("late.png", 0);
    let ready = ready_image("ok.png");
    let mut pool = Pool::new(vec![
        Character::shot(8.0, 8.0, loading.clone(), 7.0, Heading::Rightward),
        Character::shot(8.0, 8.0, ready, 7.0, Heading::Rightward),
    ]);
    assert!(!pool.are_all_ready());
    assert_eq!(pool.allocate(|s| activate_shot(s, 0.0, 0.0)), Some(1));

    loading.settle(Readiness::Ready);
    assert!(pool.are_all_ready());
    assert_eq!(pool.allocate(|s| activate_shot(s, 0.0, 0.0)), Some(0));
}

#[test]
fn first_failed_reports_broken_image() {
    let broken = ImageHandle::pending("broken.png", 0);
    broken.settle(Readiness::Failed);
    let pool = Pool::new(vec![
        Character::shot(8.0, 8.0, ready_image("ok.png"), 7.0, Heading::Rightward),
        Character::shot(8.0, 8.0, broken, 7.0, Heading::Rightward),
    ]);
    assert_eq!(pool.first_failed().map(|i| i.path()), Some("broken.png"));
}

proptest! {
    #[test]
    fn allocation_activates_at_most_the_lowest_free_slot(
        alive in proptest::collection::vec(any::<bool>(), 0..24)
    ) {
        let before: Vec<i32> = alive.iter().map(|&a| if a { 1 } else { 0 }).collect();
        let mut pool = pool_with_life(&before);

        let index = pool.allocate(|s| activate_shot(s, 1.0, 1.0));
        let expected = before.iter().position(|&life| life <= 0);
        prop_assert_eq!(index, expected);

        let after = lives(&pool);
        let changed: Vec<usize> = (0..before.len()).filter(|&i| before[i] != after[i]).collect();
        match expected {
            Some(i) => prop_assert_eq!(changed, vec![i]),
            None => prop_assert!(changed.is_empty()),
        }
    }
}

//! Tests for MovementController (fakes вместо engine collaborators).

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use bevy::math::Ray3d;
    use bevy::prelude::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    use crate::controller::*;

    struct FakeAgent {
        position: Vec3,
        destination: Vec3,
        stopping_distance: f32,
        stopped: bool,
    }

    impl NavigationAgent for FakeAgent {
        fn set_destination(&mut self, destination: Vec3) {
            self.destination = destination;
        }
        fn destination(&self) -> Vec3 {
            self.destination
        }
        fn stopping_distance(&self) -> f32 {
            self.stopping_distance
        }
        fn position(&self) -> Vec3 {
            self.position
        }
        fn set_stopped(&mut self, stopped: bool) {
            self.stopped = stopped;
        }
    }

    #[derive(Default)]
    struct FakeAnimation {
        running: bool,
    }

    impl AnimationSignal for FakeAnimation {
        fn set_running(&mut self, running: bool) {
            self.running = running;
        }
    }

    struct FakeDoor {
        wait_position: Vec3,
        duration: f32,
        open_calls: u32,
    }

    #[derive(Default)]
    struct FakeDoors {
        doors: HashMap<Entity, FakeDoor>,
    }

    impl DoorRegistry for FakeDoors {
        fn wait_position(&self, door: Entity, _from: Vec3) -> Option<Vec3> {
            self.doors.get(&door).map(|d| d.wait_position)
        }
        fn animation_duration(&self, door: Entity) -> Option<f32> {
            self.doors.get(&door).map(|d| d.duration)
        }
        fn open(&mut self, door: Entity) -> Option<()> {
            let door = self.doors.get_mut(&door)?;
            door.open_calls += 1;
            Some(())
        }
    }

    /// Камера смотрит вниз: screen (x, y) → луч над точкой (x, 10, y)
    struct FakeCamera;

    impl ViewCamera for FakeCamera {
        fn viewport_to_ray(&self, screen_position: Vec2) -> Option<Ray3d> {
            Some(Ray3d::new(
                Vec3::new(screen_position.x, 10.0, screen_position.y),
                Dir3::NEG_Y,
            ))
        }
    }

    /// Пол только в квадрате |x|,|z| <= 10
    struct FakeFloor;

    impl SceneRaycast for FakeFloor {
        fn cast(&self, ray: Ray3d) -> Option<Vec3> {
            let point = Vec3::new(ray.origin.x, 0.0, ray.origin.z);
            (point.x.abs() <= 10.0 && point.z.abs() <= 10.0).then_some(point)
        }
    }

    struct Rig {
        agent: FakeAgent,
        animation: FakeAnimation,
        doors: FakeDoors,
    }

    fn door_id() -> Entity {
        Entity::from_raw(1)
    }

    fn other_door_id() -> Entity {
        Entity::from_raw(2)
    }

    fn make_rig() -> Rig {
        let mut doors = FakeDoors::default();
        doors.doors.insert(
            door_id(),
            FakeDoor { wait_position: Vec3::new(2.0, 0.0, 1.0), duration: 2.0, open_calls: 0 },
        );
        doors.doors.insert(
            other_door_id(),
            FakeDoor { wait_position: Vec3::new(-3.0, 0.0, 0.0), duration: 1.0, open_calls: 0 },
        );

        Rig {
            agent: FakeAgent {
                position: Vec3::ZERO,
                destination: Vec3::ZERO,
                stopping_distance: 0.1,
                stopped: false,
            },
            animation: FakeAnimation::default(),
            doors,
        }
    }

    fn click(controller: &mut MovementController, rig: &mut Rig, screen: Vec2) -> ClickOutcome {
        let mut body = AvatarBody::new(&mut rig.agent, &mut rig.animation);
        controller.handle_primary_action(screen, &FakeCamera, &FakeFloor, &mut body)
    }

    fn enter_door(
        controller: &mut MovementController,
        rig: &mut Rig,
        door: Entity,
    ) -> Result<TriggerOutcome, MovementError> {
        let mut body = AvatarBody::new(&mut rig.agent, &mut rig.animation);
        controller.on_door_trigger_entered(door, &mut body, &rig.doors)
    }

    fn tick(controller: &mut MovementController, rig: &mut Rig, delta: f32) -> Result<(), MovementError> {
        let mut body = AvatarBody::new(&mut rig.agent, &mut rig.animation);
        controller.tick(delta, &mut body, &mut rig.doors)
    }

    fn open_calls(rig: &Rig, door: Entity) -> u32 {
        rig.doors.doors[&door].open_calls
    }

    #[test]
    fn test_click_sets_goal_and_stops_on_arrival() {
        let mut rig = make_rig();
        let mut controller = MovementController::new(Vec3::ZERO);
        assert!(!controller.is_moving());

        let outcome = click(&mut controller, &mut rig, Vec2::new(5.0, 5.0));
        let goal = Vec3::new(5.0, 0.0, 5.0);
        assert_eq!(outcome, ClickOutcome::GoalSet(goal));
        assert_eq!(controller.current_goal(), goal);
        assert_eq!(rig.agent.destination, goal);
        assert!(controller.is_moving());
        assert!(rig.animation.running);

        rig.agent.position = Vec3::new(2.5, 0.0, 2.5);
        tick(&mut controller, &mut rig, 0.5).unwrap();
        assert!(controller.is_moving());

        rig.agent.position = Vec3::new(5.0, 0.0, 4.95);
        tick(&mut controller, &mut rig, 0.5).unwrap();
        assert!(!controller.is_moving());
        assert!(!rig.animation.running);
    }

    #[test]
    fn test_click_miss_is_a_no_op() {
        let mut rig = make_rig();
        let mut controller = MovementController::new(Vec3::ZERO);

        let outcome = click(&mut controller, &mut rig, Vec2::new(50.0, 0.0));
        assert_eq!(outcome, ClickOutcome::NoGeometryHit);
        assert_eq!(controller.current_goal(), Vec3::ZERO);
        assert!(!controller.is_moving());
        assert!(!rig.animation.running);
    }

    #[test]
    fn test_monitor_stops_for_any_goal_within_tolerance() {
        let offsets = [Vec3::ZERO, Vec3::new(0.05, 0.0, 0.0), Vec3::new(0.0, 0.0, -0.0625)];

        for offset in offsets {
            // Goal от click
            let mut rig = make_rig();
            let mut controller = MovementController::new(Vec3::ZERO);
            click(&mut controller, &mut rig, Vec2::new(3.0, 3.0));
            rig.agent.position = Vec3::new(3.0, 0.0, 3.0) + offset;
            tick(&mut controller, &mut rig, 0.25).unwrap();
            assert!(!controller.is_moving(), "click goal, offset {:?}", offset);

            // Goal от door sequence
            let mut rig = make_rig();
            let mut controller = MovementController::new(Vec3::ZERO);
            enter_door(&mut controller, &mut rig, door_id()).unwrap();
            rig.agent.position = Vec3::new(2.0, 0.0, 1.0) + offset;
            tick(&mut controller, &mut rig, 0.25).unwrap();
            assert!(!controller.is_moving(), "wait goal, offset {:?}", offset);
        }
    }

    #[test]
    fn test_door_sequence_full_cycle() {
        let mut rig = make_rig();
        let mut controller = MovementController::new(Vec3::ZERO);
        let final_goal = Vec3::new(5.0, 0.0, 5.0);
        let wait_goal = Vec3::new(2.0, 0.0, 1.0);

        click(&mut controller, &mut rig, Vec2::new(5.0, 5.0));
        rig.agent.position = Vec3::new(2.0, 0.0, 2.0);

        let outcome = enter_door(&mut controller, &mut rig, door_id()).unwrap();
        assert_eq!(outcome, TriggerOutcome::SequenceStarted { wait_goal, open_delay: 2.0 });
        assert_eq!(controller.current_goal(), wait_goal);
        assert_eq!(rig.agent.destination, wait_goal);
        assert!(!controller.has_control());
        assert!(controller.is_moving());
        assert!(controller.is_cooldown_active());

        let sequence = controller.pending_sequence().unwrap();
        assert_eq!(sequence.final_goal, final_goal);
        assert_eq!(sequence.phase, SequencePhase::MovingToWait);

        // Ещё не дошли — дверь не трогаем
        tick(&mut controller, &mut rig, 0.5).unwrap();
        assert_eq!(open_calls(&rig, door_id()), 0);

        rig.agent.position = wait_goal;
        tick(&mut controller, &mut rig, 0.5).unwrap();
        assert_eq!(open_calls(&rig, door_id()), 1);
        assert!(!controller.is_moving());
        assert_eq!(
            controller.pending_sequence().unwrap().phase,
            SequencePhase::WaitingForDoor { remaining: 2.0 }
        );

        // 1.5 секунды — ещё ждём
        for _ in 0..3 {
            tick(&mut controller, &mut rig, 0.5).unwrap();
            assert!(!controller.has_control());
            assert_eq!(controller.current_goal(), wait_goal);
        }

        rig.agent.stopped = true;
        tick(&mut controller, &mut rig, 0.5).unwrap();
        assert!(controller.has_control());
        assert!(controller.pending_sequence().is_none());
        assert_eq!(controller.current_goal(), final_goal);
        assert_eq!(rig.agent.destination, final_goal);
        assert!(!rig.agent.stopped);
        assert!(controller.is_moving());
        assert!(rig.animation.running);
        assert_eq!(open_calls(&rig, door_id()), 1);
    }

    #[test]
    fn test_click_ignored_while_sequence_owns_goal() {
        let mut rig = make_rig();
        let mut controller = MovementController::new(Vec3::ZERO);
        enter_door(&mut controller, &mut rig, door_id()).unwrap();

        let outcome = click(&mut controller, &mut rig, Vec2::new(-4.0, 4.0));
        assert_eq!(outcome, ClickOutcome::ControlWithheld);
        assert_eq!(controller.current_goal(), Vec3::new(2.0, 0.0, 1.0));
    }

    #[test]
    fn test_second_trigger_within_cooldown_is_ignored() {
        let mut rig = make_rig();
        let mut controller = MovementController::new(Vec3::ZERO);
        click(&mut controller, &mut rig, Vec2::new(5.0, 5.0));

        assert!(matches!(
            enter_door(&mut controller, &mut rig, door_id()),
            Ok(TriggerOutcome::SequenceStarted { .. })
        ));
        let first = controller.pending_sequence().cloned();

        tick(&mut controller, &mut rig, 0.25).unwrap();
        tick(&mut controller, &mut rig, 0.25).unwrap();

        let outcome = enter_door(&mut controller, &mut rig, door_id()).unwrap();
        assert_eq!(outcome, TriggerOutcome::Ignored(ReentrantTrigger::CooldownActive));
        assert_eq!(controller.pending_sequence().cloned(), first);
    }

    #[test]
    fn test_trigger_after_cooldown_still_blocked_by_control() {
        let mut rig = make_rig();
        let mut controller = MovementController::new(Vec3::ZERO);
        enter_door(&mut controller, &mut rig, door_id()).unwrap();

        // 1.5s > окна 1.4s, но аватар всё ещё идёт к wait goal
        for _ in 0..3 {
            tick(&mut controller, &mut rig, 0.5).unwrap();
        }
        assert!(!controller.is_cooldown_active());

        let outcome = enter_door(&mut controller, &mut rig, other_door_id()).unwrap();
        assert_eq!(outcome, TriggerOutcome::Ignored(ReentrantTrigger::ControlWithheld));
        assert_eq!(controller.pending_sequence().unwrap().door, door_id());
    }

    #[test]
    fn test_control_withheld_exactly_while_sequence_alive() {
        let mut rig = make_rig();
        let mut controller = MovementController::new(Vec3::ZERO);
        click(&mut controller, &mut rig, Vec2::new(5.0, 5.0));
        enter_door(&mut controller, &mut rig, door_id()).unwrap();

        let mut saw_sequence_end = false;
        for step in 0..20 {
            if step == 4 {
                rig.agent.position = Vec3::new(2.0, 0.0, 1.0);
            }
            tick(&mut controller, &mut rig, 0.25).unwrap();
            assert_eq!(
                controller.has_control(),
                controller.pending_sequence().is_none(),
                "step {}",
                step
            );
            saw_sequence_end |= controller.has_control();
        }
        assert!(saw_sequence_end);
        assert_eq!(open_calls(&rig, door_id()), 1);
    }

    #[test]
    fn test_final_goal_round_trip_for_random_goals() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for _ in 0..50 {
            let mut rig = make_rig();
            let mut controller = MovementController::new(Vec3::ZERO);
            let screen = Vec2::new(rng.gen_range(-10.0f32..10.0), rng.gen_range(-10.0f32..10.0));
            click(&mut controller, &mut rig, screen);
            let goal_before = controller.current_goal();

            // Trigger сразу — исходный goal ни разу не достигнут
            enter_door(&mut controller, &mut rig, door_id()).unwrap();
            rig.agent.position = Vec3::new(2.0, 0.0, 1.0);
            for _ in 0..12 {
                tick(&mut controller, &mut rig, 0.25).unwrap();
            }

            assert!(controller.has_control());
            assert_eq!(controller.current_goal(), goal_before);
            assert_eq!(rig.agent.destination, goal_before);
        }
    }

    #[test]
    fn test_final_goal_ignores_agent_retargeted_behind_controller() {
        let mut rig = make_rig();
        let mut controller = MovementController::new(Vec3::ZERO);
        click(&mut controller, &mut rig, Vec2::new(5.0, 5.0));

        // Хост сам перенаправил агента: controller об этом не знает
        rig.agent.destination = Vec3::new(-7.0, 0.0, 3.0);
        enter_door(&mut controller, &mut rig, door_id()).unwrap();
        assert_eq!(
            controller.pending_sequence().unwrap().final_goal,
            Vec3::new(5.0, 0.0, 5.0)
        );

        rig.agent.position = Vec3::new(2.0, 0.0, 1.0);
        for _ in 0..10 {
            tick(&mut controller, &mut rig, 0.25).unwrap();
        }
        assert!(controller.has_control());
        assert_eq!(rig.agent.destination, Vec3::new(5.0, 0.0, 5.0));
    }

    #[test]
    fn test_missing_door_fails_fast_without_side_effects() {
        let mut rig = make_rig();
        let mut controller = MovementController::new(Vec3::ZERO);
        click(&mut controller, &mut rig, Vec2::new(5.0, 5.0));
        let before = controller.clone();

        let ghost = Entity::from_raw(99);
        let err = enter_door(&mut controller, &mut rig, ghost).unwrap_err();
        assert_eq!(err, MovementError::MissingCollaborator(Collaborator::Door(ghost)));
        assert_eq!(controller, before);
        assert!(!controller.is_cooldown_active());
    }

    #[test]
    fn test_non_finite_door_data_is_rejected() {
        let mut rig = make_rig();
        rig.doors.doors.get_mut(&door_id()).unwrap().duration = f32::NAN;
        let mut controller = MovementController::new(Vec3::ZERO);

        let err = enter_door(&mut controller, &mut rig, door_id()).unwrap_err();
        assert!(matches!(err, MovementError::InvalidCollaboratorData { .. }));
        assert!(controller.has_control());
        assert!(controller.pending_sequence().is_none());
    }

    #[test]
    fn test_door_vanishing_mid_sequence_returns_control() {
        let mut rig = make_rig();
        let mut controller = MovementController::new(Vec3::ZERO);
        click(&mut controller, &mut rig, Vec2::new(5.0, 5.0));
        enter_door(&mut controller, &mut rig, door_id()).unwrap();

        rig.doors.doors.remove(&door_id());
        rig.agent.position = Vec3::new(2.0, 0.0, 1.0);

        let err = tick(&mut controller, &mut rig, 0.25).unwrap_err();
        assert_eq!(err, MovementError::MissingCollaborator(Collaborator::Door(door_id())));
        assert!(controller.has_control());
        assert!(controller.pending_sequence().is_none());
        assert_eq!(controller.current_goal(), Vec3::new(5.0, 0.0, 5.0));
    }

    #[test]
    fn test_cancel_restores_goal_once() {
        let mut rig = make_rig();
        let mut controller = MovementController::new(Vec3::ZERO);
        click(&mut controller, &mut rig, Vec2::new(5.0, 5.0));
        enter_door(&mut controller, &mut rig, door_id()).unwrap();
        rig.agent.position = Vec3::new(2.0, 0.0, 1.0);
        tick(&mut controller, &mut rig, 0.25).unwrap();
        assert!(matches!(
            controller.pending_sequence().unwrap().phase,
            SequencePhase::WaitingForDoor { .. }
        ));

        let mut body = AvatarBody::new(&mut rig.agent, &mut rig.animation);
        assert!(controller.cancel_door_sequence(&mut body));
        assert!(!controller.cancel_door_sequence(&mut body));

        assert!(controller.has_control());
        assert!(controller.is_cooldown_active());
        assert_eq!(controller.current_goal(), Vec3::new(5.0, 0.0, 5.0));
    }

    #[test]
    fn test_zero_delay_resumes_on_next_tick() {
        let mut rig = make_rig();
        rig.doors.doors.get_mut(&door_id()).unwrap().duration = 0.0;
        let mut controller = MovementController::new(Vec3::ZERO);
        click(&mut controller, &mut rig, Vec2::new(5.0, 5.0));
        enter_door(&mut controller, &mut rig, door_id()).unwrap();
        rig.agent.position = Vec3::new(2.0, 0.0, 1.0);

        tick(&mut controller, &mut rig, 0.25).unwrap();
        assert!(!controller.has_control());
        tick(&mut controller, &mut rig, 0.25).unwrap();
        assert!(controller.has_control());
        assert_eq!(controller.current_goal(), Vec3::new(5.0, 0.0, 5.0));
    }
}

#![no_main]

use hexsettle::Scenario;
use hexsettle::world::check_invariants;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // Parsing arbitrary text must fail cleanly, never panic.
    let Ok(mut scenario) = Scenario::parse(text) else {
        return;
    };

    // Cap the work a single input can request.
    if u32::from(scenario.max_q) * u32::from(scenario.max_r) > 1 << 16 {
        return;
    }
    scenario.people_max = scenario.people_max.min(1024);
    scenario.tiles.truncate(512);
    scenario.people.truncate(512);

    let Ok((mut world, _)) = scenario.build_world() else {
        return;
    };
    for _ in 0..scenario.ticks.min(16) {
        world.update(scenario.dt);
    }
    assert!(check_invariants(&world).is_empty());
});

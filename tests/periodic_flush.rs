use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::yield_now;
use tokio::time::advance;

use statrelay::prelude::*;

#[derive(Clone, Default)]
struct CapturingSink {
    sent: Arc<Mutex<Vec<MetricPayload>>>,
}

impl CapturingSink {
    fn sent(&self) -> Vec<MetricPayload> {
        self.sent.lock().clone()
    }
}

impl MetricsSink for CapturingSink {
    async fn put_metrics(&self, payload: MetricPayload) -> Result<(), SinkError> {
        self.sent.lock().push(payload);
        Ok(())
    }
}

struct StaticResolver {
    group_name: Option<&'static str>,
}

impl MetadataResolver for StaticResolver {
    async fn instance_id(&self) -> Option<String> {
        Some("i-500f6ca6".into())
    }

    async fn group_name(&self, _: &str) -> Result<Option<String>, MetadataError> {
        Ok(self.group_name.map(String::from))
    }
}

#[tokio::test(start_paused = true)]
async fn flushes_statistics_and_zero_periods_on_schedule() {
    let aggregator = SampleAggregator::new();
    let sink = CapturingSink::default();
    let resolver = StaticResolver {
        group_name: Some("web-asg"),
    };

    let emitter = PeriodicEmitter::resolve(aggregator.clone(), sink.clone(), &resolver)
        .await
        .unwrap()
        .with_namespace("TEST");
    let schedule = ScheduleSettings::default()
        .with_time_unit(TimeUnit::Minutes)
        .with_initial_delay(1)
        .with_period(1);

    let task = EmitterTask::spawn(emitter, schedule).unwrap();
    yield_now().await;

    let measurer = ElapsedTimeMeasurer::new(aggregator.clone());
    for elapsed in [100, 300, 500, 200, 100] {
        measurer.add_measurement(Duration::from_millis(elapsed));
    }

    advance(Duration::from_secs(60)).await;
    yield_now().await;

    // first period carries the recorded statistics under both dimension sets
    let sent = sink.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].namespace, "TEST");
    assert_eq!(sent[0].data.len(), 2);

    for datum in &sent[0].data {
        assert_eq!(datum.metric_name, "ElapsedTime");
        assert_eq!(datum.unit, Unit::Milliseconds);
        assert_eq!(
            datum.value,
            MetricValue::Statistics(StatisticSet {
                minimum: 100.0,
                maximum: 500.0,
                sample_count: 5,
                sum: 1200.0,
            })
        );
    }
    assert_eq!(sent[0].data[0].dimensions[0].name(), "InstanceId");
    assert_eq!(
        sent[0].data[1].dimensions[0].name(),
        "AutoScalingGroupName"
    );

    // second period saw no samples and falls back to scalar zeroes
    advance(Duration::from_secs(60)).await;
    yield_now().await;

    let sent = sink.sent();
    assert_eq!(sent.len(), 2);
    for datum in &sent[1].data {
        assert_eq!(datum.value, MetricValue::Scalar(0.0));
    }

    task.stop().await;

    advance(Duration::from_secs(300)).await;
    yield_now().await;
    assert_eq!(sink.sent().len(), 2, "no flushes after shutdown");
}

#[tokio::test(start_paused = true)]
async fn samples_recorded_during_a_flush_land_in_the_next_period() {
    let aggregator = SampleAggregator::new();
    let sink = CapturingSink::default();
    let resolver = StaticResolver { group_name: None };

    let emitter = PeriodicEmitter::resolve(aggregator.clone(), sink.clone(), &resolver)
        .await
        .unwrap();

    let task = EmitterTask::spawn(emitter, ScheduleSettings::default()).unwrap();
    yield_now().await;

    aggregator.record(75.0);
    advance(Duration::from_secs(60)).await;
    yield_now().await;
    aggregator.record(25.0);

    advance(Duration::from_secs(60)).await;
    yield_now().await;
    task.stop().await;

    let sent = sink.sent();
    assert_eq!(sent.len(), 2);

    let counts = sent
        .iter()
        .map(|payload| match payload.data[0].value {
            MetricValue::Statistics(statistics) => statistics.sample_count,
            MetricValue::Scalar(_) => 0,
        })
        .collect::<Vec<_>>();

    assert_eq!(counts, vec![1, 1], "each sample counted exactly once");
}

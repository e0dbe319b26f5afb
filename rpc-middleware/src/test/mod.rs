mod metrics_middleware_test;

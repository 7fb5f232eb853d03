mod notification_test;

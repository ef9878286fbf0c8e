mod money_test;
